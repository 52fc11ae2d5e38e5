//! In-memory [`CurationStore`] used by this crate's unit tests.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use chrono::Utc;

use crate::{
  decision::{CurationDecision, CurationStatus},
  record::CurationRecord,
  store::{CurationStore, StoreStats},
};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
  #[error("duplicate record id: {0}")]
  Duplicate(String),
  #[error("record not found: {0}")]
  NotFound(String),
  #[error("injected failure")]
  Injected,
}

#[derive(Default)]
pub struct MemoryStore {
  inner:         Mutex<Inner>,
  fail_decision: AtomicBool,
}

#[derive(Default)]
struct Inner {
  /// Insertion order is creation order.
  records:   Vec<CurationRecord>,
  decisions: Vec<CurationDecision>,
}

impl MemoryStore {
  /// Make the next `record_decision` call fail before writing anything.
  pub fn fail_next_decision(&self) {
    self.fail_decision.store(true, Ordering::SeqCst);
  }
}

impl CurationStore for MemoryStore {
  type Error = MemoryError;

  async fn insert_record(&self, record: CurationRecord) -> Result<(), MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    if inner.records.iter().any(|r| r.id == record.id) {
      return Err(MemoryError::Duplicate(record.id));
    }
    inner.records.push(record);
    Ok(())
  }

  async fn get_record(&self, id: &str) -> Result<Option<CurationRecord>, MemoryError> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.records.iter().find(|r| r.id == id).cloned())
  }

  async fn record_exists(&self, id: &str) -> Result<bool, MemoryError> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.records.iter().any(|r| r.id == id))
  }

  async fn get_records_by_status(
    &self,
    status: CurationStatus,
  ) -> Result<Vec<CurationRecord>, MemoryError> {
    let inner = self.inner.lock().unwrap();
    Ok(
      inner
        .records
        .iter()
        .rev()
        .filter(|r| r.status == status)
        .cloned()
        .collect(),
    )
  }

  async fn get_all_records(&self) -> Result<Vec<CurationRecord>, MemoryError> {
    let inner = self.inner.lock().unwrap();
    Ok(inner.records.iter().rev().cloned().collect())
  }

  async fn record_decision(&self, decision: CurationDecision) -> Result<(), MemoryError> {
    if self.fail_decision.swap(false, Ordering::SeqCst) {
      return Err(MemoryError::Injected);
    }
    let mut inner = self.inner.lock().unwrap();
    let record = inner
      .records
      .iter_mut()
      .find(|r| r.id == decision.record_id)
      .ok_or_else(|| MemoryError::NotFound(decision.record_id.clone()))?;
    record.status = decision.resulting_status();
    record.updated_at = Utc::now();
    inner.decisions.push(decision);
    Ok(())
  }

  async fn get_decisions_for_record(
    &self,
    record_id: &str,
  ) -> Result<Vec<CurationDecision>, MemoryError> {
    let inner = self.inner.lock().unwrap();
    Ok(
      inner
        .decisions
        .iter()
        .rev()
        .filter(|d| d.record_id == record_id)
        .cloned()
        .collect(),
    )
  }

  async fn get_stats(&self) -> Result<StoreStats, MemoryError> {
    let inner = self.inner.lock().unwrap();
    let mut stats = StoreStats {
      total: inner.records.len() as u64,
      ..Default::default()
    };
    for r in &inner.records {
      match r.status {
        CurationStatus::Pending => stats.pending += 1,
        CurationStatus::Accepted => stats.accepted += 1,
        CurationStatus::Rejected => stats.rejected += 1,
        CurationStatus::Deferred => stats.deferred += 1,
      }
    }
    Ok(stats)
  }
}
