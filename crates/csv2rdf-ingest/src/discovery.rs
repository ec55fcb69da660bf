//! Input path discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && has_csv_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Input paths after directory expansion.
#[derive(Debug, Default)]
pub struct ExpandedInputs {
    /// Files to read, in argument order; directories contribute their sorted CSV files.
    pub files: Vec<PathBuf>,
    /// Directories that could not be listed. Each one costs only its own contribution.
    pub failures: Vec<(PathBuf, IngestError)>,
}

/// Expands directories into their CSV files and keeps every other path as given.
///
/// Paths that do not exist are passed through so the converter can report
/// them as missing instead of silently dropping them.
pub fn expand_inputs(inputs: &[PathBuf]) -> ExpandedInputs {
    let mut expanded = ExpandedInputs::default();
    for input in inputs {
        if !input.is_dir() {
            expanded.files.push(input.clone());
            continue;
        }
        match list_csv_files(input) {
            Ok(files) => {
                if files.is_empty() {
                    tracing::warn!(dir = %input.display(), "directory contains no CSV files");
                }
                expanded.files.extend(files);
            }
            Err(error) => {
                tracing::warn!(dir = %input.display(), %error, "cannot list input directory");
                expanded.failures.push((input.clone(), error));
            }
        }
    }
    expanded
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
