//! Single-owner store of every entity produced during one conversion run.

use std::collections::HashMap;

use crate::entity::{Entity, EntityKind, PropertyMap, Value};
use crate::error::{ModelError, Result};
use crate::ids::{EntityId, normalize_label};
use crate::predicate::Predicate;

/// Entity store with get-or-create semantics and first-seen ordering.
///
/// The registry lives for exactly one conversion; nothing here is global.
#[derive(Debug, Default, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    positions: HashMap<EntityId, usize>,
    derived: HashMap<(EntityKind, String), EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier for `(kind, natural_key)`, creating the entity on first use.
    ///
    /// For primary kinds the key is the declared record ID. For derived kinds
    /// it is the label; the new entity receives that label as its only
    /// property.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingIdentifier`] when the key is blank, and
    /// [`ModelError::IdentifierCollision`] when a derived label mints an
    /// identifier that another label already owns.
    pub fn get_or_create(&mut self, kind: EntityKind, natural_key: &str) -> Result<EntityId> {
        if kind.is_primary() {
            let id = EntityId::primary(kind, natural_key)?;
            self.insert_if_absent(&id, kind);
            return Ok(id);
        }

        let label = normalize_label(natural_key);
        if label.is_empty() {
            return Err(ModelError::MissingIdentifier { kind });
        }
        let key = (kind, label);
        if let Some(existing) = self.derived.get(&key) {
            return Ok(existing.clone());
        }
        let id = EntityId::derived(kind, &key.1)?;
        if self.positions.contains_key(&id) {
            return Err(ModelError::IdentifierCollision { kind, id });
        }
        let position = self.insert_if_absent(&id, kind);
        self.entities[position].set_once(Predicate::Label, Value::text(key.1.clone()));
        self.derived.insert(key, id.clone());
        Ok(id)
    }

    /// Merges a row's assembled properties into an existing entity.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownEntity`] when `id` was never created.
    pub fn commit(&mut self, id: &EntityId, properties: PropertyMap) -> Result<usize> {
        let position = *self
            .positions
            .get(id)
            .ok_or_else(|| ModelError::UnknownEntity(id.clone()))?;
        Ok(self.entities[position].merge(properties))
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.positions.get(id).map(|&position| &self.entities[position])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.positions.contains_key(id)
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|entity| entity.kind == kind).count()
    }

    /// Reference targets that no entity in this run declares.
    pub fn dangling_references(&self) -> Vec<&EntityId> {
        let mut dangling: Vec<&EntityId> = Vec::new();
        for entity in &self.entities {
            for (_, value) in entity.properties() {
                let Some(targets) = value.as_references() else {
                    continue;
                };
                for target in targets {
                    if !self.contains(target) && !dangling.contains(&target) {
                        dangling.push(target);
                    }
                }
            }
        }
        dangling
    }

    fn insert_if_absent(&mut self, id: &EntityId, kind: EntityKind) -> usize {
        if let Some(&position) = self.positions.get(id) {
            return position;
        }
        let position = self.entities.len();
        self.entities.push(Entity::new(id.clone(), kind));
        self.positions.insert(id.clone(), position);
        position
    }
}
