//! Turtle document rendering.
//!
//! Layout is fixed so that two runs over the same input are byte-identical:
//!
//! ```text
//! @prefix ex: <http://example.org/dassault#> .
//! @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//! @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
//!
//! ex:ER_ER004 a ex:EnhancementRequest ;
//!     ex:belongsToCustomer ex:Customer_Tesla ;
//!     ex:isSimilarTo ex:ER_ER025, ex:IR_IR004 .
//!
//! ```
//!
//! Entities appear in first-seen order; properties in canonical predicate
//! order (see [`Predicate`]).

use std::fmt::{self, Write};

use csv2rdf_model::{
    Datatype, Entity, EntityId, EntityRegistry, Namespace, Predicate, RDFS_NAMESPACE, Value,
    Vocabulary, XSD_NAMESPACE,
};

use crate::escape::escape_literal;

const INDENT: &str = "    ";

/// Renders the whole registry as a Turtle document.
pub fn render_turtle(registry: &EntityRegistry, namespace: &Namespace) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_turtle(&mut out, registry, namespace).ok();
    tracing::debug!(
        entities = registry.len(),
        bytes = out.len(),
        "rendered turtle"
    );
    out
}

/// Streams the Turtle document into any `fmt::Write` sink.
pub fn write_turtle<W: Write>(
    out: &mut W,
    registry: &EntityRegistry,
    namespace: &Namespace,
) -> fmt::Result {
    write_prefixes(out, namespace)?;
    for entity in registry.entities() {
        write_entity(out, entity, namespace)?;
    }
    Ok(())
}

fn write_prefixes<W: Write>(out: &mut W, namespace: &Namespace) -> fmt::Result {
    writeln!(out, "@prefix {}: <{}> .", namespace.prefix(), namespace.uri())?;
    writeln!(out, "@prefix rdfs: <{RDFS_NAMESPACE}> .")?;
    writeln!(out, "@prefix xsd: <{XSD_NAMESPACE}> .")?;
    writeln!(out)
}

fn write_entity<W: Write>(out: &mut W, entity: &Entity, namespace: &Namespace) -> fmt::Result {
    let prefix = namespace.prefix();
    write!(
        out,
        "{prefix}:{} a {prefix}:{}",
        entity.id,
        entity.kind.type_name()
    )?;
    for (predicate, value) in entity.properties() {
        out.write_str(" ;\n")?;
        out.write_str(INDENT)?;
        write_predicate(out, predicate, namespace)?;
        out.write_char(' ')?;
        write_object(out, value, namespace)?;
    }
    out.write_str(" .\n\n")
}

fn write_predicate<W: Write>(out: &mut W, predicate: Predicate, namespace: &Namespace) -> fmt::Result {
    match predicate.vocabulary() {
        Vocabulary::Data => write!(out, "{}:{}", namespace.prefix(), predicate.local_name()),
        Vocabulary::Schema => write!(out, "rdfs:{}", predicate.local_name()),
    }
}

fn write_object<W: Write>(out: &mut W, value: &Value, namespace: &Namespace) -> fmt::Result {
    match value {
        Value::Literal { lexical, datatype } => {
            write!(out, "\"{}\"", escape_literal(lexical))?;
            match datatype {
                Some(Datatype::Date) => write!(out, "^^xsd:{}", Datatype::Date.local_name()),
                None => Ok(()),
            }
        }
        Value::References(targets) => {
            for (index, target) in targets.iter().enumerate() {
                if index > 0 {
                    out.write_str(", ")?;
                }
                write_reference(out, target, namespace)?;
            }
            Ok(())
        }
    }
}

fn write_reference<W: Write>(out: &mut W, target: &EntityId, namespace: &Namespace) -> fmt::Result {
    write!(out, "{}:{}", namespace.prefix(), target)
}
