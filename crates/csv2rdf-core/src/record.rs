//! Per-row record building.
//!
//! Each data row walks a fixed sequence of [`RowState`]s:
//!
//! ```text
//! ReadRow -> NormalizeColumns -> ExtractPrimaryEntity -> ExtractDerivedEntities
//!         -> ExtractRelationships -> ExtractScalarProperties -> Commit
//! ```
//!
//! A row without a usable identifier stops at `ExtractPrimaryEntity` and is
//! reported as a diagnostic. An unparseable date only drops that property.

use std::fmt;

use csv2rdf_ingest::{CsvTable, Field};
use csv2rdf_model::{
    Diagnostic, DiagnosticKind, Diagnostics, EntityId, EntityKind, EntityRegistry, ModelError,
    Predicate, PropertyMap, Value,
};
use tracing::{trace, warn};

use crate::date::normalize_date;
use crate::relationships::resolve_references;

const REDACTED_VALUE: &str = "[REDACTED]";

/// Plain-text columns and the predicate each one fills.
const SCALAR_COLUMNS: [(Field, Predicate); 7] = [
    (Field::Title, Predicate::Label),
    (Field::Description, Predicate::Description),
    (Field::Priority, Predicate::Priority),
    (Field::Product, Predicate::Product),
    (Field::RequestType, Predicate::RequestType),
    (Field::Severity, Predicate::Severity),
    (Field::Status, Predicate::Status),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    ReadRow,
    NormalizeColumns,
    ExtractPrimaryEntity,
    ExtractDerivedEntities,
    ExtractRelationships,
    ExtractScalarProperties,
    Commit,
}

impl RowState {
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadRow => "read_row",
            Self::NormalizeColumns => "normalize_columns",
            Self::ExtractPrimaryEntity => "extract_primary_entity",
            Self::ExtractDerivedEntities => "extract_derived_entities",
            Self::ExtractRelationships => "extract_relationships",
            Self::ExtractScalarProperties => "extract_scalar_properties",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Committed {
        id: EntityId,
        kind: EntityKind,
        /// Properties written by this row.
        changed: usize,
    },
    Skipped(DiagnosticKind),
}

impl RowOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Row cells addressed by canonical field, blank cells read as absent.
struct NormalizedRow<'a> {
    table: &'a CsvTable,
    cells: &'a [String],
}

impl<'a> NormalizedRow<'a> {
    fn get(&self, field: &Field) -> Option<&'a str> {
        self.table
            .value(self.cells, field)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Turns the rows of one table into entities in a shared registry.
pub struct RecordBuilder<'a> {
    table: &'a CsvTable,
    registry: &'a mut EntityRegistry,
    diagnostics: &'a mut Diagnostics,
    log_values: bool,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(
        table: &'a CsvTable,
        registry: &'a mut EntityRegistry,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            table,
            registry,
            diagnostics,
            log_values: false,
        }
    }

    /// Allow raw cell values in log output.
    #[must_use]
    pub fn with_log_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }

    /// Builds every row of the table, in file order.
    ///
    /// # Errors
    ///
    /// Only registry invariant violations; data problems become diagnostics.
    pub fn build_all(&mut self) -> Result<Vec<RowOutcome>, ModelError> {
        let table = self.table;
        table
            .rows
            .iter()
            .enumerate()
            .map(|(index, cells)| self.build_row(index + 1, cells))
            .collect()
    }

    /// Builds one row; `row_number` is 1-based and excludes the header.
    ///
    /// # Errors
    ///
    /// Only registry invariant violations; data problems become diagnostics.
    pub fn build_row(
        &mut self,
        row_number: usize,
        cells: &[String],
    ) -> Result<RowOutcome, ModelError> {
        let table = self.table;
        let source = table.source.as_str();
        trace!(source, row = row_number, state = %RowState::ReadRow, cells = cells.len());

        trace!(source, row = row_number, state = %RowState::NormalizeColumns);
        let row = NormalizedRow { table, cells };

        trace!(source, row = row_number, state = %RowState::ExtractPrimaryEntity);
        let (kind, raw_id) = match self.primary_key(&row) {
            Ok(key) => key,
            Err(kind) => {
                let message = match kind {
                    DiagnosticKind::MissingIdentifier => "identifier column is empty",
                    _ => "no enhancement or incident identifier column",
                };
                self.report(Diagnostic::row(kind, source, row_number, message));
                return Ok(RowOutcome::Skipped(kind));
            }
        };
        let id = self.registry.get_or_create(kind, raw_id)?;
        let mut properties = PropertyMap::new();

        trace!(source, row = row_number, state = %RowState::ExtractDerivedEntities);
        for (field, derived_kind, predicate) in [
            (Field::Customer, EntityKind::Customer, Predicate::BelongsToCustomer),
            (Field::Module, EntityKind::Module, Predicate::MentionsFunction),
        ] {
            let Some(label) = row.get(&field) else {
                continue;
            };
            match self.registry.get_or_create(derived_kind, label) {
                Ok(target) => {
                    properties.insert(predicate, Value::reference(target));
                }
                Err(ModelError::IdentifierCollision { id, .. }) => {
                    self.report(
                        Diagnostic::row(
                            DiagnosticKind::IdentifierCollision,
                            source,
                            row_number,
                            format!("{derived_kind} label maps to {id}, which another label owns"),
                        )
                        .with_field(field.key()),
                    );
                }
                Err(error) => return Err(error),
            }
        }

        trace!(source, row = row_number, state = %RowState::ExtractRelationships);
        if let Some(raw) = row.get(&Field::SimilarTo) {
            let targets = resolve_references(raw);
            if !targets.is_empty() {
                properties.insert(Predicate::IsSimilarTo, Value::references(targets));
            }
        }

        trace!(source, row = row_number, state = %RowState::ExtractScalarProperties);
        for (field, predicate) in &SCALAR_COLUMNS {
            if let Some(text) = row.get(field) {
                properties.insert(*predicate, Value::text(text));
            }
        }
        if let Some(raw) = row.get(&Field::CreatedOn) {
            match normalize_date(raw) {
                Some(date) => {
                    properties.insert(Predicate::CreatedOn, Value::date(date));
                }
                None => {
                    let shown = if self.log_values { raw } else { REDACTED_VALUE };
                    self.report(
                        Diagnostic::row(
                            DiagnosticKind::UnparseableDate,
                            source,
                            row_number,
                            format!("date '{shown}' matches no accepted format"),
                        )
                        .with_field(Field::CreatedOn.key()),
                    );
                }
            }
        }

        trace!(
            source,
            row = row_number,
            state = %RowState::Commit,
            entity = %id,
            properties = properties.len()
        );
        let changed = self.registry.commit(&id, properties)?;
        Ok(RowOutcome::Committed { id, kind, changed })
    }

    /// Record type and raw identifier, or the diagnostic kind that skips the row.
    fn primary_key<'r>(
        &self,
        row: &NormalizedRow<'r>,
    ) -> Result<(EntityKind, &'r str), DiagnosticKind> {
        if let Some(raw) = row.get(&Field::EnhancementId) {
            return Ok((EntityKind::EnhancementRequest, raw));
        }
        if let Some(raw) = row.get(&Field::IncidentId) {
            return Ok((EntityKind::IncidentReport, raw));
        }
        let table = self.table;
        if table.has_field(&Field::EnhancementId) || table.has_field(&Field::IncidentId) {
            Err(DiagnosticKind::MissingIdentifier)
        } else {
            Err(DiagnosticKind::SkippedRow)
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(
            source = %diagnostic.source,
            row = diagnostic.row,
            field = diagnostic.field.as_deref(),
            kind = diagnostic.kind.label(),
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }
}
