//! Graph-to-record projection for Gutenberg catalog metadata.
//!
//! One catalog document is one RDF graph; this crate flattens it into a
//! nested, sparse [`BookRecord`] keyed by the book id:
//!
//! - [`vocab`] — the fixed predicate/type IRIs the corpus uses,
//! - [`record`] — the output record shapes (serde, sparse by construction),
//! - [`project`] — the projection itself.

pub mod project;
pub mod record;
pub mod vocab;

pub use project::{project, Projection};
pub use record::{BookRecord, Creator, FileFormat, IntOrString};
