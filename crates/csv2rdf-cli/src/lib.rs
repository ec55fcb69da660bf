//! CLI library components for the CSV to RDF converter.

pub mod commands;
pub mod logging;
pub mod types;
