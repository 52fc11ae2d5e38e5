//! Error type for `sieve-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The description is well-formed YAML but lacks the `assertion` block or
  /// one of its required identifiers.
  #[error("parse error: {0}")]
  Parse(String),

  #[error("yaml error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// Validation or lifecycle failure reported by `sieve-core`.
  #[error(transparent)]
  Core(#[from] sieve_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
