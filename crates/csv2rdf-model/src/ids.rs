#![deny(unsafe_code)]

use std::fmt;

use sha2::Digest;

use crate::ModelError;
use crate::entity::EntityKind;

/// Identifier of an entity, unique within one conversion run.
///
/// Always non-empty and restricted to `[A-Za-z0-9_]`, so it can be used as
/// the local part of a prefixed name without further escaping.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() || !value.chars().all(is_local_char) {
            return Err(ModelError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Identifier of a primary entity from its declared record ID.
    ///
    /// `ER004` and `ER_ER004` both yield `ER_ER004` for an enhancement request.
    pub fn primary(kind: EntityKind, raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::MissingIdentifier { kind });
        }
        let sanitized = sanitize(trimmed);
        let prefix = kind.id_prefix();
        if has_kind_prefix(&sanitized, prefix) {
            Ok(Self(sanitized))
        } else {
            Ok(Self(format!("{prefix}_{sanitized}")))
        }
    }

    /// Identifier of a derived entity from its label.
    ///
    /// Depends only on the normalized label. Labels made of ASCII letters,
    /// digits and spaces map directly. Any other label gets a short digest
    /// after a double underscore, which the direct form never contains.
    pub fn derived(kind: EntityKind, label: &str) -> Result<Self, ModelError> {
        let label = normalize_label(label);
        if label.is_empty() {
            return Err(ModelError::MissingIdentifier { kind });
        }
        let prefix = kind.id_prefix();
        if label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == ' ') {
            return Ok(Self(format!("{prefix}_{}", label.replace(' ', "_"))));
        }
        let digest = sha2::Sha256::digest(label.as_bytes());
        let suffix = hex::encode(&digest[..4]);
        Ok(Self(format!("{prefix}_{}__{suffix}", sanitize(&label))))
    }

    /// Identifier named by a cross-reference, whether or not it is ever declared.
    ///
    /// Returns `None` for blank input.
    pub fn reference(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let sanitized = sanitize(trimmed);
        for kind in [EntityKind::EnhancementRequest, EntityKind::IncidentReport] {
            let prefix = kind.id_prefix();
            if has_kind_prefix(&sanitized, prefix) {
                return Some(Self(sanitized));
            }
            let bare = sanitized
                .strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|ch| ch.is_ascii_digit());
            if bare {
                return Some(Self(format!("{prefix}_{sanitized}")));
            }
        }
        Some(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_local_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn has_kind_prefix(value: &str, prefix: &str) -> bool {
    value
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('_'))
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|ch| if is_local_char(ch) { ch } else { '_' })
        .collect()
}

/// Trims and collapses internal whitespace; case is preserved.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
