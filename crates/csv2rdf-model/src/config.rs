use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

pub const DEFAULT_PREFIX: &str = "ex";
pub const DEFAULT_NAMESPACE: &str = "http://example.org/dassault#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Data namespace used to prefix every entity, class and data predicate.
///
/// Only affects rendering; entity identity never depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    prefix: String,
    uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let uri = uri.into();
        if !is_valid_prefix(&prefix) {
            return Err(ModelError::InvalidPrefix(prefix));
        }
        if !is_valid_uri(&uri) {
            return Err(ModelError::InvalidNamespace(uri));
        }
        Ok(Self { prefix, uri })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            uri: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Settings the conversion engine consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub namespace: Namespace,
    /// Whether cell values (customer names, raw dates) may appear in logs.
    #[serde(default)]
    pub log_values: bool,
}

impl ConverterConfig {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            log_values: false,
        }
    }

    #[must_use]
    pub fn with_log_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }
}

// Turtle PN_PREFIX restricted to ASCII.
fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if prefix.ends_with('.') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}

fn is_valid_uri(uri: &str) -> bool {
    !uri.is_empty()
        && !uri
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, '<' | '>' | '"' | '{' | '}' | '\\'))
}
