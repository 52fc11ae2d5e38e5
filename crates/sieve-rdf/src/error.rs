//! Error type for `sieve-rdf`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Reading records or decisions failed.
  #[error(transparent)]
  Core(#[from] sieve_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("xml error: {0}")]
  Xml(String),

  /// RDF/XML needs every predicate as an XML qualified name; this IRI has no
  /// usable local part.
  #[error("predicate cannot be written as RDF/XML: {0}")]
  UnrepresentablePredicate(String),

  #[error("unsupported {what}: {value:?}")]
  Unsupported { what: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
