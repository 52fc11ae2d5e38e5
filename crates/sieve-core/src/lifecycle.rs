//! The curation lifecycle: how records enter the store and how decisions move
//! their status.
//!
//! ```text
//!              ┌──────── ACCEPT ───────▶ ACCEPTED ─┐
//!   PENDING ───┼──────── REJECT ───────▶ REJECTED ─┼── any new decision ──▶ …
//!              └──────── DEFER  ───────▶ DEFERRED ─┘
//! ```
//!
//! There is no forbidden-transition table: a decided record may be reviewed
//! again and the new decision wins. Every status change goes through
//! [`apply_decision`]; the only other write is the PENDING insert in
//! [`create_record`].

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  decision::{CurationDecision, CurationStatus, NewDecision},
  record::CurationRecord,
  store::{CurationStore, StoreStats},
};

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Insert a newly created record. The record must be structurally valid and
/// still PENDING.
pub async fn create_record<S>(store: &S, record: CurationRecord) -> Result<()>
where
  S: CurationStore,
{
  record.validate()?;
  if record.status != CurationStatus::Pending {
    return Err(Error::Validation(format!(
      "record {} must be created PENDING, not {}",
      record.id, record.status
    )));
  }

  let id = record.id.clone();
  store.insert_record(record).await.map_err(Error::store)?;
  tracing::debug!(record_id = %id, "record created");
  Ok(())
}

/// Validate and persist a decision, moving the record to the mapped status.
///
/// Fails with [`Error::RecordNotFound`] if the record does not exist and
/// with [`Error::Validation`] for a REJECT without rationale; in both cases
/// nothing is written. Otherwise the decision row and the status update are
/// committed together by the store.
pub async fn apply_decision<S>(
  store: &S,
  input: NewDecision,
) -> Result<CurationDecision>
where
  S: CurationStore,
{
  let exists = store
    .record_exists(&input.record_id)
    .await
    .map_err(Error::store)?;
  if !exists {
    return Err(Error::RecordNotFound(input.record_id));
  }
  input.validate()?;

  let decision = CurationDecision {
    id:           Uuid::new_v4().to_string(),
    record_id:    input.record_id,
    curator_id:   input.curator_id,
    curator_name: input.curator_name,
    decision:     input.decision,
    rationale:    input.rationale,
    decided_at:   Utc::now(),
  };

  store
    .record_decision(decision.clone())
    .await
    .map_err(Error::store)?;

  tracing::info!(
    record_id = %decision.record_id,
    decision = %decision.decision,
    curator = %decision.curator_id,
    "decision applied"
  );
  Ok(decision)
}

// ─── Reads ───────────────────────────────────────────────────────────────────

pub async fn get_record<S>(store: &S, id: &str) -> Result<Option<CurationRecord>>
where
  S: CurationStore,
{
  store.get_record(id).await.map_err(Error::store)
}

/// Records currently in `status`, most recently created first.
pub async fn records_by_status<S>(
  store: &S,
  status: CurationStatus,
) -> Result<Vec<CurationRecord>>
where
  S: CurationStore,
{
  store
    .get_records_by_status(status)
    .await
    .map_err(Error::store)
}

pub async fn all_records<S>(store: &S) -> Result<Vec<CurationRecord>>
where
  S: CurationStore,
{
  store.get_all_records().await.map_err(Error::store)
}

/// Decision history for a record, most recent first.
pub async fn decisions_for<S>(
  store: &S,
  record_id: &str,
) -> Result<Vec<CurationDecision>>
where
  S: CurationStore,
{
  store
    .get_decisions_for_record(record_id)
    .await
    .map_err(Error::store)
}

/// The decision the record's status currently reflects, if any.
pub async fn current_decision<S>(
  store: &S,
  record_id: &str,
) -> Result<Option<CurationDecision>>
where
  S: CurationStore,
{
  Ok(decisions_for(store, record_id).await?.into_iter().next())
}

pub async fn stats<S>(store: &S) -> Result<StoreStats>
where
  S: CurationStore,
{
  store.get_stats().await.map_err(Error::store)
}
