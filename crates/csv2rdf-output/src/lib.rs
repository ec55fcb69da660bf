//! Serialization of the entity graph.
//!
//! - [`render_turtle`]: the Turtle document written by the converter
//! - [`triples`]: a flat view of the same graph, one assertion per item
//! - [`escape_literal`] / [`unescape_literal`]: quoted-literal escaping

mod escape;
mod triples;
mod turtle;

pub use escape::{UnescapeError, escape_literal, unescape_literal};
pub use triples::{Term, Triple, triples};
pub use turtle::{render_turtle, write_turtle};
