use std::path::PathBuf;

use csv2rdf_core::FileSummary;
use csv2rdf_model::{ConversionStats, Diagnostics};
use serde::Serialize;

/// Settings for one `csv2rdf` run, already separated from argument parsing.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Files or directories, in the order given.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Write the document to stdout instead of `output`.
    pub stdout: bool,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    /// JSON diagnostics report destination.
    pub report: Option<PathBuf>,
    /// Treat any diagnostic as a failed run.
    pub strict: bool,
    pub log_values: bool,
}

#[derive(Debug)]
pub struct RunResult {
    /// Where the document was written; `None` when it went to stdout.
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub files: Vec<FileSummary>,
    pub diagnostics: Diagnostics,
    pub stats: ConversionStats,
    pub has_errors: bool,
}

/// Body of the `--report` file.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub stats: &'a ConversionStats,
    pub files: &'a [FileSummary],
    pub diagnostics: &'a Diagnostics,
}
