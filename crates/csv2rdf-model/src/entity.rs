//! Entities and property values of the output graph.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::predicate::Predicate;

/// The four node types the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    EnhancementRequest,
    IncidentReport,
    Module,
    Customer,
}

impl EntityKind {
    /// Class name used in the type declaration (`a prefix:<name>`).
    pub fn type_name(self) -> &'static str {
        match self {
            Self::EnhancementRequest => "EnhancementRequest",
            Self::IncidentReport => "IncidentReport",
            Self::Module => "Module",
            Self::Customer => "Customer",
        }
    }

    /// Leading segment of every identifier minted for this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::EnhancementRequest => "ER",
            Self::IncidentReport => "IR",
            Self::Module => "Module",
            Self::Customer => "Customer",
        }
    }

    /// Primary entities are declared by a row; derived ones come from a column value.
    pub fn is_primary(self) -> bool {
        matches!(self, Self::EnhancementRequest | Self::IncidentReport)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Datatype tag carried by a typed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datatype {
    Date,
}

impl Datatype {
    /// Local name within the XML Schema datatype namespace.
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Date => "date",
        }
    }
}

/// Object of a property: a literal or an ordered list of entity references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Literal {
        lexical: String,
        datatype: Option<Datatype>,
    },
    References(Vec<EntityId>),
}

impl Value {
    pub fn text(lexical: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            datatype: None,
        }
    }

    pub fn date(lexical: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            datatype: Some(Datatype::Date),
        }
    }

    pub fn reference(target: EntityId) -> Self {
        Self::References(vec![target])
    }

    /// Builds a reference list, dropping repeated targets but keeping first-mention order.
    pub fn references(targets: impl IntoIterator<Item = EntityId>) -> Self {
        let mut ordered: Vec<EntityId> = Vec::new();
        for target in targets {
            if !ordered.contains(&target) {
                ordered.push(target);
            }
        }
        Self::References(ordered)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal { lexical, .. } => lexical.is_empty(),
            Self::References(targets) => targets.is_empty(),
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal { lexical, .. } => Some(lexical),
            Self::References(_) => None,
        }
    }

    pub fn as_references(&self) -> Option<&[EntityId]> {
        match self {
            Self::References(targets) => Some(targets),
            Self::Literal { .. } => None,
        }
    }
}

/// Properties of one entity, iterated in canonical predicate order.
pub type PropertyMap = BTreeMap<Predicate, Value>;

/// A node of the output graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    properties: PropertyMap,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            properties: PropertyMap::new(),
        }
    }

    pub fn get(&self, predicate: Predicate) -> Option<&Value> {
        self.properties.get(&predicate)
    }

    pub fn properties(&self) -> impl Iterator<Item = (Predicate, &Value)> {
        self.properties.iter().map(|(predicate, value)| (*predicate, value))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Merges incoming properties: non-empty values overwrite, empty ones never unset.
    ///
    /// Returns the number of properties written.
    pub fn merge(&mut self, incoming: PropertyMap) -> usize {
        let mut written = 0;
        for (predicate, value) in incoming {
            if value.is_empty() {
                continue;
            }
            self.properties.insert(predicate, value);
            written += 1;
        }
        written
    }

    /// Sets a property only when it has no value yet.
    pub(crate) fn set_once(&mut self, predicate: Predicate, value: Value) {
        if value.is_empty() {
            return;
        }
        self.properties.entry(predicate).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> EntityId {
        EntityId::new(value).expect("valid id")
    }

    #[test]
    fn references_keep_first_mention_order() {
        let value = Value::references([id("ER_2"), id("IR_1"), id("ER_2"), id("ER_3")]);
        let targets = value.as_references().unwrap();
        assert_eq!(targets, &[id("ER_2"), id("IR_1"), id("ER_3")]);
    }

    #[test]
    fn merge_never_unsets() {
        let mut entity = Entity::new(id("ER_ER1"), EntityKind::EnhancementRequest);
        let mut first = PropertyMap::new();
        first.insert(Predicate::Status, Value::text("Open"));
        first.insert(Predicate::Priority, Value::text("P1"));
        entity.merge(first);

        let mut second = PropertyMap::new();
        second.insert(Predicate::Status, Value::text(""));
        second.insert(Predicate::Priority, Value::text("P2"));
        assert_eq!(entity.merge(second), 1);

        assert_eq!(entity.get(Predicate::Status), Some(&Value::text("Open")));
        assert_eq!(entity.get(Predicate::Priority), Some(&Value::text("P2")));
    }

    #[test]
    fn kind_prefixes() {
        assert_eq!(EntityKind::EnhancementRequest.id_prefix(), "ER");
        assert_eq!(EntityKind::IncidentReport.id_prefix(), "IR");
        assert!(EntityKind::IncidentReport.is_primary());
        assert!(!EntityKind::Customer.is_primary());
    }
}
