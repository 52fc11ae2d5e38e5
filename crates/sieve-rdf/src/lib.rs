//! RDF export for Sieve.
//!
//! Projects ACCEPTED curation records, with the provenance of their most
//! recent decision, into an RDF graph and writes it as Turtle, N-Triples,
//! N3, RDF/XML or JSON-LD. Pure apart from [`export`], which reads from a
//! [`sieve_core::store::CurationStore`] and writes one file.

pub mod error;
mod export;
mod graph;
mod project;
mod serialize;
pub mod term;
pub mod vocab;

pub use error::{Error, Result};
pub use export::{ExportOptions, build_graph, export, record_turtle, render};
pub use graph::Graph;
pub use project::{ProvenanceStyle, project};
pub use serialize::{Format, serialize};
pub use vocab::expand_curie;
