use std::fmt;

use serde::{Deserialize, Serialize};

/// Vocabulary a predicate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// The configurable data namespace (`ex:` by default).
    Data,
    /// `rdfs:`
    Schema,
}

/// The fixed relationship vocabulary.
///
/// Variant order is the canonical rendering order: `Label` first, then the
/// rest sorted by local name. `Ord` is derived, so a `BTreeMap` keyed by
/// `Predicate` iterates in output order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Predicate {
    Label,
    BelongsToCustomer,
    CreatedOn,
    Description,
    IsSimilarTo,
    MentionsFunction,
    Priority,
    Product,
    RequestType,
    Severity,
    Status,
}

impl Predicate {
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::BelongsToCustomer => "belongsToCustomer",
            Self::CreatedOn => "createdOn",
            Self::Description => "description",
            Self::IsSimilarTo => "isSimilarTo",
            Self::MentionsFunction => "mentionsFunction",
            Self::Priority => "priority",
            Self::Product => "product",
            Self::RequestType => "requestType",
            Self::Severity => "severity",
            Self::Status => "status",
        }
    }

    pub fn vocabulary(self) -> Vocabulary {
        match self {
            Self::Label => Vocabulary::Schema,
            _ => Vocabulary::Data,
        }
    }

    /// Whether the object of this predicate is an entity reference.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            Self::BelongsToCustomer | Self::IsSimilarTo | Self::MentionsFunction
        )
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}
