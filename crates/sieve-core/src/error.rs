//! Error types for `sieve-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or empty, an enumerated field holds a value
  /// outside its closed set, or a boundary rule (e.g. REJECT needs a
  /// rationale) is violated.
  #[error("validation failed: {0}")]
  Validation(String),

  /// A decision referenced a record that does not exist.
  #[error("record not found: {0}")]
  RecordNotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn missing(field: &str) -> Self {
    Self::Validation(format!("required field `{field}` is missing or empty"))
  }

  pub(crate) fn not_in_set(field: &str, value: &str) -> Self {
    Self::Validation(format!("`{field}` has unsupported value {value:?}"))
  }

  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
