use thiserror::Error;

use crate::entity::EntityKind;
use crate::ids::EntityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing identifier for {kind} entity")]
    MissingIdentifier { kind: EntityKind },
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
    #[error("identifier {id} already belongs to another {kind} label")]
    IdentifierCollision { kind: EntityKind, id: EntityId },
    #[error("invalid entity identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid namespace prefix: {0:?}")]
    InvalidPrefix(String),
    #[error("invalid namespace URI: {0:?}")]
    InvalidNamespace(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
