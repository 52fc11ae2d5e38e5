//! Ingestion engine for Sieve.
//!
//! Turns externally authored YAML record descriptions into
//! [`sieve_core::record::CurationRecord`]s and inserts them through
//! [`sieve_core::lifecycle::create_record`]. Insertion is idempotent on the
//! record id: a description whose id is already stored is skipped, never
//! merged or overwritten.
//!
//! # Quick start
//!
//! ```no_run
//! # async fn run(store: &impl sieve_core::store::CurationStore) {
//! let outcome = sieve_ingest::ingest_directory(store, "data/inbox").await.unwrap();
//! println!("{} inserted, {} skipped", outcome.inserted, outcome.skipped);
//! # }
//! ```

mod engine;
pub mod error;
mod parse;

use serde::Serialize;

pub use engine::{
  ingest_batch, ingest_directory, ingest_file, ingest_one, ingest_record, ingest_str,
};
pub use error::{Error, Result};
pub use parse::{documents, parse};

// ─── Public types ────────────────────────────────────────────────────────────

/// What happened to a single description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
  Inserted,
  /// A record with the same id already exists; nothing was written.
  Skipped,
}

/// A description that could not be ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemError {
  /// Where the description came from, e.g. `inbox/a.yaml #2`.
  pub item:  String,
  pub error: String,
}

/// Aggregate result of a batch. The batch always runs to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
  pub inserted: usize,
  pub skipped:  usize,
  pub errors:   Vec<ItemError>,
}

/// Aggregate result of a directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryOutcome {
  /// YAML files visited, including those that failed.
  pub files:    usize,
  pub inserted: usize,
  pub skipped:  usize,
  pub errors:   Vec<ItemError>,
}

impl DirectoryOutcome {
  fn absorb(&mut self, batch: BatchOutcome) {
    self.inserted += batch.inserted;
    self.skipped += batch.skipped;
    self.errors.extend(batch.errors);
  }
}
