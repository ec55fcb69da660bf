//! Header normalization and the column alias table.

use std::fmt;

/// Canonical field a CSV column maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    EnhancementId,
    IncidentId,
    Customer,
    Module,
    CreatedOn,
    Description,
    Priority,
    Product,
    Status,
    Severity,
    RequestType,
    Title,
    SimilarTo,
    /// Unrecognized header, kept in normalized form and ignored downstream.
    Other(String),
}

// Aliases are matched after `normalize_alias`, so `created_on`,
// `Created-On` and `created  on` all hit "created on".
fn lookup_alias(alias: &str) -> Option<Field> {
    let field = match alias {
        "er" | "er id" | "enhancement" | "enhancement id" | "enhancement request" => {
            Field::EnhancementId
        }
        "ir" | "ir id" | "incident" | "incident id" | "incident report" => Field::IncidentId,
        "customer" | "customer name" | "client" => Field::Customer,
        "module" | "module name" | "function" => Field::Module,
        "created on" | "created" | "creation date" | "date" => Field::CreatedOn,
        "description" => Field::Description,
        "priority" => Field::Priority,
        "product" => Field::Product,
        "status" => Field::Status,
        "severity" => Field::Severity,
        "request type" | "type" => Field::RequestType,
        "title" | "summary" => Field::Title,
        "similar to" | "similar" | "similar items" => Field::SimilarTo,
        _ => return None,
    };
    Some(field)
}

impl Field {
    /// Maps a raw header to its canonical field. Never fails.
    pub fn from_header(raw: &str) -> Self {
        let normalized = normalize_header(raw);
        let alias = normalize_alias(&normalized);
        lookup_alias(&alias).unwrap_or(Field::Other(normalized))
    }

    /// Canonical key, as used in diagnostics.
    pub fn key(&self) -> &str {
        match self {
            Self::EnhancementId => "enhancement_id",
            Self::IncidentId => "incident_id",
            Self::Customer => "customer",
            Self::Module => "module",
            Self::CreatedOn => "created_on",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Product => "product",
            Self::Status => "status",
            Self::Severity => "severity",
            Self::RequestType => "request_type",
            Self::Title => "title",
            Self::SimilarTo => "similar_to",
            Self::Other(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Trims, lowercases and collapses internal whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_alias(normalized: &str) -> String {
    normalized
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
