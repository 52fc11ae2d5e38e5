//! Error type for `sieve-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] sieve_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A decision referenced a record id with no row in `curation_records`.
  #[error("record not found: {0}")]
  RecordNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
