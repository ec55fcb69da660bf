//! Input loading for the CSV to RDF converter.
//!
//! This crate turns input files into [`CsvTable`]s whose columns carry
//! canonical [`Field`]s.
//!
//! # Features
//!
//! - **Encoding fallback**: UTF-8, then ISO-8859-1, then Windows-1252
//! - **Column normalization**: header spellings such as `ER`, `enhancement`
//!   or `Enhancement_ID` map to one field
//! - **Discovery**: directories expand to their CSV files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csv2rdf_ingest::{Field, read_csv_file};
//!
//! let table = read_csv_file(Path::new("data/enhancements.csv"))?;
//! let customer_column = table.column(&Field::Customer);
//! ```

mod columns;
mod csv_table;
mod discovery;
mod encoding;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Columns ===
pub use columns::{Field, normalize_header};

// === CSV Reading ===
pub use csv_table::{CsvTable, read_csv_bytes, read_csv_file};

// === Encodings ===
pub use encoding::{DECODE_ORDER, TextEncoding, decode_text};

// === File Discovery ===
pub use discovery::{ExpandedInputs, expand_inputs, list_csv_files};
