//! Flat triple view of the entity graph.
//!
//! Hosts that browse the result or push it into a triple store work with
//! individual assertions rather than the grouped Turtle layout. Terms are
//! fully expanded IRIs so no prefix table is needed downstream.

use std::fmt;

use csv2rdf_model::{
    Datatype, EntityRegistry, Namespace, RDFS_NAMESPACE, Value, Vocabulary, XSD_NAMESPACE,
};

use crate::escape::escape_literal;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    Literal {
        lexical: String,
        datatype: Option<String>,
    },
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal { lexical, datatype } => {
                write!(f, "\"{}\"", escape_literal(lexical))?;
                if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl fmt::Display for Triple {
    /// One statement with fully expanded terms, without the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Flattens the registry into triples, in the same order the Turtle writer uses.
///
/// A reference list yields one triple per target.
pub fn triples(registry: &EntityRegistry, namespace: &Namespace) -> Vec<Triple> {
    let base = namespace.uri();
    let mut out = Vec::new();
    for entity in registry.entities() {
        let subject = format!("{base}{}", entity.id);
        out.push(Triple {
            subject: subject.clone(),
            predicate: RDF_TYPE.to_string(),
            object: Term::Iri(format!("{base}{}", entity.kind.type_name())),
        });
        for (predicate, value) in entity.properties() {
            let predicate_iri = match predicate.vocabulary() {
                Vocabulary::Data => format!("{base}{}", predicate.local_name()),
                Vocabulary::Schema => format!("{RDFS_NAMESPACE}{}", predicate.local_name()),
            };
            match value {
                Value::Literal { lexical, datatype } => out.push(Triple {
                    subject: subject.clone(),
                    predicate: predicate_iri,
                    object: Term::Literal {
                        lexical: lexical.clone(),
                        datatype: datatype.map(datatype_iri),
                    },
                }),
                Value::References(targets) => {
                    for target in targets {
                        out.push(Triple {
                            subject: subject.clone(),
                            predicate: predicate_iri.clone(),
                            object: Term::Iri(format!("{base}{target}")),
                        });
                    }
                }
            }
        }
    }
    out
}

fn datatype_iri(datatype: Datatype) -> String {
    format!("{XSD_NAMESPACE}{}", datatype.local_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv2rdf_model::{EntityId, EntityKind, Predicate, PropertyMap};

    #[test]
    fn reference_lists_expand_per_target() {
        let mut registry = EntityRegistry::new();
        let id = registry
            .get_or_create(EntityKind::EnhancementRequest, "ER1")
            .unwrap();
        let mut props = PropertyMap::new();
        props.insert(
            Predicate::IsSimilarTo,
            Value::references([
                EntityId::new("ER_ER2").unwrap(),
                EntityId::new("IR_IR3").unwrap(),
            ]),
        );
        props.insert(Predicate::CreatedOn, Value::date("22-01-2024"));
        registry.commit(&id, props).unwrap();

        let all = triples(&registry, &Namespace::default());
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].predicate, RDF_TYPE);
        assert_eq!(
            all[1].to_string(),
            "<http://example.org/dassault#ER_ER1> <http://example.org/dassault#createdOn> \
             \"22-01-2024\"^^<http://www.w3.org/2001/XMLSchema#date> ."
        );
        assert_eq!(
            all[3].object,
            Term::Iri("http://example.org/dassault#IR_IR3".to_string())
        );
    }

    #[test]
    fn label_uses_rdfs_namespace() {
        let mut registry = EntityRegistry::new();
        registry.get_or_create(EntityKind::Module, "CAD").unwrap();
        let all = triples(&registry, &Namespace::default());
        assert_eq!(
            all[1].to_string(),
            "<http://example.org/dassault#Module_CAD> \
             <http://www.w3.org/2000/01/rdf-schema#label> \"CAD\" ."
        );
    }
}
