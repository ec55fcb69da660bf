//! Data model for the CSV to RDF converter.
//!
//! Entities, their identifiers and property values, the fixed predicate
//! vocabulary, the per-run [`EntityRegistry`] and the diagnostics a
//! conversion reports.

pub mod config;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod ids;
pub mod predicate;
pub mod registry;

pub use config::{
    ConverterConfig, DEFAULT_NAMESPACE, DEFAULT_PREFIX, Namespace, RDFS_NAMESPACE, XSD_NAMESPACE,
};
pub use diagnostics::{ConversionStats, Diagnostic, DiagnosticKind, DiagnosticScope, Diagnostics};
pub use entity::{Datatype, Entity, EntityKind, PropertyMap, Value};
pub use error::{ModelError, Result};
pub use ids::{EntityId, normalize_label, sanitize};
pub use predicate::{Predicate, Vocabulary};
pub use registry::EntityRegistry;
