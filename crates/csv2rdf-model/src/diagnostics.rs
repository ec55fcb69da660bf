use serde::{Deserialize, Serialize};

/// Condition recorded while converting; none of these abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    FileNotFound,
    FileUnreadable,
    MissingIdentifier,
    SkippedRow,
    UnparseableDate,
    IdentifierCollision,
}

/// How much input a diagnostic cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticScope {
    /// The whole file contributed nothing.
    File,
    /// One row was skipped.
    Row,
    /// One property was omitted; the row was kept.
    Field,
}

impl DiagnosticKind {
    pub fn scope(self) -> DiagnosticScope {
        match self {
            Self::FileNotFound | Self::FileUnreadable => DiagnosticScope::File,
            Self::MissingIdentifier | Self::SkippedRow => DiagnosticScope::Row,
            Self::UnparseableDate | Self::IdentifierCollision => DiagnosticScope::Field,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FileNotFound => "file not found",
            Self::FileUnreadable => "file unreadable",
            Self::MissingIdentifier => "missing identifier",
            Self::SkippedRow => "skipped row",
            Self::UnparseableDate => "unparseable date",
            Self::IdentifierCollision => "identifier collision",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Input the condition was found in (path or upload name).
    pub source: String,
    /// 1-based data row, header excluded.
    pub row: Option<usize>,
    /// Canonical field name for field-level conditions.
    pub field: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn file(kind: DiagnosticKind, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            row: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn row(
        kind: DiagnosticKind,
        source: impl Into<String>,
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            row: Some(row),
            field: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.0.iter().filter(|d| d.kind == kind).count()
    }

    /// Sources whose whole contribution was lost.
    pub fn failed_sources(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|d| d.kind.scope() == DiagnosticScope::File)
            .map(|d| d.source.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub files_read: usize,
    pub files_failed: usize,
    pub rows_seen: usize,
    pub rows_committed: usize,
    pub rows_skipped: usize,
    pub enhancement_requests: usize,
    pub incident_reports: usize,
    pub customers: usize,
    pub modules: usize,
    pub triples: usize,
}

impl ConversionStats {
    pub fn entities(&self) -> usize {
        self.enhancement_requests + self.incident_reports + self.customers + self.modules
    }
}
