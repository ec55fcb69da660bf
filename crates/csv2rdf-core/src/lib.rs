//! CSV to RDF conversion engine.
//!
//! Reads enhancement-request and incident-report tables, builds one entity
//! graph across all of them and renders it as Turtle.
//!
//! # Example
//!
//! ```ignore
//! use csv2rdf_core::convert;
//! use csv2rdf_model::ConverterConfig;
//!
//! let output = convert(&["data/er.csv", "data/ir.csv"], &ConverterConfig::default())?;
//! std::fs::write("output.ttl", &output.document)?;
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{}: {}", diagnostic.source, diagnostic.message);
//! }
//! ```

pub mod convert;
pub mod date;
pub mod error;
pub mod record;
pub mod relationships;

pub use convert::{
    ConversionOutput, Converter, FileOutcome, FileSummary, convert, convert_inputs,
};
pub use date::{normalize_date, parse_date};
pub use error::{ConvertError, Result};
pub use record::{RecordBuilder, RowOutcome, RowState};
pub use relationships::resolve_references;
