//! The `CurationStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `sieve-store-sqlite`).
//! Higher layers (`sieve-ingest`, `sieve-rdf`, `sieve-api`) depend on this
//! abstraction and on [`crate::lifecycle`], not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  decision::{CurationDecision, CurationStatus},
  record::CurationRecord,
};

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Record counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
  pub total:    u64,
  pub pending:  u64,
  pub accepted: u64,
  pub rejected: u64,
  pub deferred: u64,
}

impl StoreStats {
  pub fn count(&self, status: CurationStatus) -> u64 {
    match status {
      CurationStatus::Pending => self.pending,
      CurationStatus::Accepted => self.accepted,
      CurationStatus::Rejected => self.rejected,
      CurationStatus::Deferred => self.deferred,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Sieve persistence backend.
///
/// Records are inserted once and never deleted; decisions are append-only.
/// There is deliberately no method that sets a record's status on its own:
/// the only status write is the one bundled into
/// [`CurationStore::record_decision`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CurationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Records ───────────────────────────────────────────────────────────

  /// Persist a new record. Fails if the id is already taken.
  fn insert_record(
    &self,
    record: CurationRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_record<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<CurationRecord>, Self::Error>> + Send + 'a;

  fn record_exists<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Records with the given status, newest `created_at` first.
  fn get_records_by_status(
    &self,
    status: CurationStatus,
  ) -> impl Future<Output = Result<Vec<CurationRecord>, Self::Error>> + Send + '_;

  /// Every record, newest `created_at` first.
  fn get_all_records(
    &self,
  ) -> impl Future<Output = Result<Vec<CurationRecord>, Self::Error>> + Send + '_;

  // ── Decisions ─────────────────────────────────────────────────────────

  /// Append `decision` and set the referenced record's status (and
  /// `updated_at`) to `decision.resulting_status()` as one atomic unit.
  /// Neither write is visible unless both succeed.
  fn record_decision(
    &self,
    decision: CurationDecision,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All decisions for a record, most recently committed first. The first
  /// entry is the decision that set the record's current status.
  fn get_decisions_for_record<'a>(
    &'a self,
    record_id: &'a str,
  ) -> impl Future<Output = Result<Vec<CurationDecision>, Self::Error>> + Send + 'a;

  // ── Aggregates ────────────────────────────────────────────────────────

  fn get_stats(
    &self,
  ) -> impl Future<Output = Result<StoreStats, Self::Error>> + Send + '_;
}
