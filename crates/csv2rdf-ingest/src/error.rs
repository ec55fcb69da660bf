//! Error types for input loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that cost a whole input file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// No supported text encoding decoded the bytes.
    #[error("{input} could not be decoded as {tried}")]
    Undecodable { input: String, tried: String },

    // === CSV Parsing Errors ===
    /// The decoded text is not well-formed CSV.
    #[error("failed to parse CSV {input}: {message}")]
    CsvParse { input: String, message: String },
}

impl IngestError {
    /// Whether the input simply does not exist, as opposed to existing but being unusable.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
