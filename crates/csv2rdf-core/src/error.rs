//! Run-level conversion errors.

use csv2rdf_model::ModelError;
use thiserror::Error;

/// Errors that fail a whole conversion run.
///
/// Unreadable files, skipped rows and bad dates are diagnostics, not errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Not a single input file could be read.
    #[error("no readable input ({failed} file(s) failed)")]
    NoReadableInput { failed: usize },

    /// The entity registry rejected an operation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
