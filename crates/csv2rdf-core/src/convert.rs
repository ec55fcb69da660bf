//! The conversion engine and its one-call entry point.

use std::path::{Path, PathBuf};
use std::time::Instant;

use csv2rdf_ingest::{
    CsvTable, IngestError, TextEncoding, expand_inputs, read_csv_bytes, read_csv_file,
};
use csv2rdf_model::{
    ConversionStats, ConverterConfig, Diagnostic, DiagnosticKind, Diagnostics, EntityKind,
    EntityRegistry, Namespace,
};
use csv2rdf_output::{Triple, render_turtle, triples};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ConvertError, Result};
use crate::record::RecordBuilder;

/// Per-file result of a successful read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub source: String,
    pub encoding: TextEncoding,
    pub rows_seen: usize,
    pub rows_committed: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Read(FileSummary),
    /// The file contributed nothing; a diagnostic of this kind was recorded.
    Failed(DiagnosticKind),
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The Turtle document.
    pub document: String,
    pub registry: EntityRegistry,
    pub namespace: Namespace,
    pub diagnostics: Diagnostics,
    pub files: Vec<FileSummary>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Flat triple view of the converted graph.
    pub fn triples(&self) -> Vec<Triple> {
        triples(&self.registry, &self.namespace)
    }
}

/// Accumulates any number of input files into one entity graph.
///
/// One converter is one run: its registry is never shared, so a host that
/// converts concurrently builds one converter per conversion.
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    registry: EntityRegistry,
    diagnostics: Diagnostics,
    files: Vec<FileSummary>,
    stats: ConversionStats,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            registry: EntityRegistry::new(),
            diagnostics: Diagnostics::new(),
            files: Vec::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Reads and converts one file from disk.
    ///
    /// A missing or unreadable file is recorded as a diagnostic and reported
    /// as [`FileOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Only registry invariant violations.
    pub fn ingest_path(&mut self, path: &Path) -> Result<FileOutcome> {
        match read_csv_file(path) {
            Ok(table) => self.ingest_table(&table),
            Err(error) => Ok(self.record_failure(&path.display().to_string(), &error)),
        }
    }

    /// Converts an in-memory file, such as an upload held by a host.
    ///
    /// # Errors
    ///
    /// Only registry invariant violations.
    pub fn ingest_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<FileOutcome> {
        match read_csv_bytes(name, bytes) {
            Ok(table) => self.ingest_table(&table),
            Err(error) => Ok(self.record_failure(name, &error)),
        }
    }

    /// Records an input that failed before any file could be read from it,
    /// such as a directory that cannot be listed.
    pub fn record_input_failure(&mut self, path: &Path, error: &IngestError) -> FileOutcome {
        self.record_failure(&path.display().to_string(), error)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Renders the accumulated graph.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoReadableInput`] when no file was read successfully.
    pub fn finish(self) -> Result<ConversionOutput> {
        let Self {
            config,
            registry,
            diagnostics,
            files,
            mut stats,
        } = self;
        if stats.files_read == 0 {
            return Err(ConvertError::NoReadableInput {
                failed: stats.files_failed,
            });
        }

        let dangling = registry.dangling_references();
        if !dangling.is_empty() {
            debug!(count = dangling.len(), "references to undeclared entities kept");
        }

        let namespace = config.namespace;
        stats.enhancement_requests = registry.count_kind(EntityKind::EnhancementRequest);
        stats.incident_reports = registry.count_kind(EntityKind::IncidentReport);
        stats.customers = registry.count_kind(EntityKind::Customer);
        stats.modules = registry.count_kind(EntityKind::Module);
        stats.triples = triples(&registry, &namespace).len();
        let document = render_turtle(&registry, &namespace);

        Ok(ConversionOutput {
            document,
            registry,
            namespace,
            diagnostics,
            files,
            stats,
        })
    }

    fn ingest_table(&mut self, table: &CsvTable) -> Result<FileOutcome> {
        let unrecognized = table.unrecognized_headers();
        if !unrecognized.is_empty() {
            debug!(
                source = %table.source,
                headers = ?unrecognized,
                "ignoring unrecognized columns"
            );
        }

        let outcomes = RecordBuilder::new(table, &mut self.registry, &mut self.diagnostics)
            .with_log_values(self.config.log_values)
            .build_all()?;
        let rows_committed = outcomes.iter().filter(|o| o.is_committed()).count();
        let summary = FileSummary {
            source: table.source.clone(),
            encoding: table.encoding,
            rows_seen: outcomes.len(),
            rows_committed,
            rows_skipped: outcomes.len() - rows_committed,
        };

        self.stats.files_read += 1;
        self.stats.rows_seen += summary.rows_seen;
        self.stats.rows_committed += summary.rows_committed;
        self.stats.rows_skipped += summary.rows_skipped;
        info!(
            source = %summary.source,
            encoding = %summary.encoding,
            rows = summary.rows_seen,
            committed = summary.rows_committed,
            skipped = summary.rows_skipped,
            "converted file"
        );
        self.files.push(summary.clone());
        Ok(FileOutcome::Read(summary))
    }

    fn record_failure(&mut self, source: &str, error: &IngestError) -> FileOutcome {
        let kind = if error.is_not_found() {
            DiagnosticKind::FileNotFound
        } else {
            DiagnosticKind::FileUnreadable
        };
        warn!(source, kind = kind.label(), %error, "skipping input file");
        self.diagnostics
            .push(Diagnostic::file(kind, source, error.to_string()));
        self.stats.files_failed += 1;
        FileOutcome::Failed(kind)
    }
}

/// Converts `files` in order into one document.
///
/// Files that cannot be read are reported in the diagnostics; the run only
/// fails when none of them could be read.
///
/// # Errors
///
/// [`ConvertError::NoReadableInput`] when every file failed (or none were
/// given).
pub fn convert<P: AsRef<Path>>(files: &[P], config: &ConverterConfig) -> Result<ConversionOutput> {
    let start = Instant::now();
    let mut converter = Converter::new(config.clone());
    for file in files {
        converter.ingest_path(file.as_ref())?;
    }
    finish_run(converter, start)
}

/// Like [`convert`], but directories among `inputs` expand to their CSV files.
///
/// A directory that cannot be listed is reported as unreadable and the
/// remaining inputs are still converted.
///
/// # Errors
///
/// [`ConvertError::NoReadableInput`] when no file could be read.
pub fn convert_inputs(inputs: &[PathBuf], config: &ConverterConfig) -> Result<ConversionOutput> {
    let start = Instant::now();
    let expanded = expand_inputs(inputs);
    debug!(
        files = expanded.files.len(),
        unlisted = expanded.failures.len(),
        "expanded inputs"
    );
    let mut converter = Converter::new(config.clone());
    for (path, error) in &expanded.failures {
        converter.record_input_failure(path, error);
    }
    for file in &expanded.files {
        converter.ingest_path(file)?;
    }
    finish_run(converter, start)
}

fn finish_run(converter: Converter, start: Instant) -> Result<ConversionOutput> {
    let output = converter.finish()?;
    info!(
        files = output.stats.files_read,
        failed = output.stats.files_failed,
        entities = output.stats.entities(),
        triples = output.stats.triples,
        diagnostics = output.diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(output)
}
