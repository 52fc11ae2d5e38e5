//! [`SqliteStore`] — the SQLite implementation of [`CurationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use sieve_core::{
  decision::{CurationDecision, CurationStatus},
  record::CurationRecord,
  store::{CurationStore, StoreStats},
};

use crate::{
  Error, Result,
  encode::{
    DECISION_COLUMNS, RECORD_COLUMNS, RawDecision, RawRecord, encode_decision_kind,
    encode_dt, encode_status,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sieve curation store backed by a single SQLite file.
///
/// Clones share the inner connection. All calls are executed in order on the
/// connection's worker thread, so two decisions for the same record are
/// applied one after the other and the status left behind is the one from
/// the later commit.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `curation_records` SELECT, binding `status` as `?1` when given.
  async fn query_records(
    &self,
    where_clause: &'static str,
    status: Option<String>,
  ) -> Result<Vec<CurationRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {RECORD_COLUMNS}
           FROM curation_records
           {where_clause}
           ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = match status {
          Some(s) => stmt
            .query_map(rusqlite::params![s], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

/// Set a record's status and refresh `updated_at`. Only ever called inside
/// the transaction that appends the decision driving the change.
fn update_status(
  conn: &rusqlite::Connection,
  record_id: &str,
  status: &str,
  updated_at: &str,
) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE curation_records SET status = ?1, updated_at = ?2 WHERE id = ?3",
    rusqlite::params![status, updated_at, record_id],
  )
}

// ─── CurationStore impl ──────────────────────────────────────────────────────

impl CurationStore for SqliteStore {
  type Error = Error;

  // ── Records ───────────────────────────────────────────────────────────────

  async fn insert_record(&self, record: CurationRecord) -> Result<()> {
    let raw = RawRecord::from_record(&record)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO curation_records ({RECORD_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
          ),
          rusqlite::params![
            raw.id,
            raw.assertion_subject_id,
            raw.assertion_subject_label,
            raw.assertion_predicate,
            raw.assertion_predicate_label,
            raw.assertion_object_id,
            raw.assertion_object_label,
            raw.provenance_present,
            raw.provenance_attributed_to,
            raw.provenance_attributed_to_label,
            raw.provenance_generated_at,
            raw.provenance_source_version,
            raw.provenance_source_uri,
            raw.evidence_items,
            raw.source_artifact_uri,
            raw.source_artifact_type,
            raw.status,
            raw.created_at,
            raw.updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get_record(&self, id: &str) -> Result<Option<CurationRecord>> {
    let id = id.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM curation_records WHERE id = ?1"),
            rusqlite::params![id],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn record_exists(&self, id: &str) -> Result<bool> {
    let id = id.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM curation_records WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;

    Ok(exists)
  }

  async fn get_records_by_status(
    &self,
    status: CurationStatus,
  ) -> Result<Vec<CurationRecord>> {
    self
      .query_records(
        "WHERE status = ?1",
        Some(encode_status(status).to_owned()),
      )
      .await
  }

  async fn get_all_records(&self) -> Result<Vec<CurationRecord>> {
    self.query_records("", None).await
  }

  // ── Decisions ─────────────────────────────────────────────────────────────

  async fn record_decision(&self, decision: CurationDecision) -> Result<()> {
    let status       = encode_status(decision.resulting_status()).to_owned();
    let kind         = encode_decision_kind(decision.decision).to_owned();
    let decided_at   = encode_dt(decision.decided_at);
    let updated_at   = encode_dt(Utc::now());
    let CurationDecision { id, record_id, curator_id, curator_name, rationale, .. } =
      decision;

    let missing: Option<String> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(
          rusqlite::TransactionBehavior::Immediate,
        )?;

        let exists = tx
          .query_row(
            "SELECT 1 FROM curation_records WHERE id = ?1",
            rusqlite::params![record_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          // Dropping `tx` rolls back.
          return Ok(Some(record_id));
        }

        tx.execute(
          &format!(
            "INSERT INTO curation_decisions ({DECISION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
          ),
          rusqlite::params![
            id,
            record_id,
            curator_id,
            curator_name,
            kind,
            rationale,
            decided_at,
          ],
        )?;
        update_status(&tx, &record_id, &status, &updated_at)?;
        tx.commit()?;
        Ok(None)
      })
      .await?;

    match missing {
      Some(record_id) => Err(Error::RecordNotFound(record_id)),
      None => Ok(()),
    }
  }

  async fn get_decisions_for_record(
    &self,
    record_id: &str,
  ) -> Result<Vec<CurationDecision>> {
    let record_id = record_id.to_owned();

    let raws: Vec<RawDecision> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DECISION_COLUMNS}
           FROM curation_decisions
           WHERE record_id = ?1
           ORDER BY rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![record_id], RawDecision::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDecision::into_decision).collect()
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn get_stats(&self) -> Result<StoreStats> {
    let counts: [i64; 5] = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT
             COUNT(*),
             COALESCE(SUM(CASE WHEN status = 'PENDING'  THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN status = 'ACCEPTED' THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN status = 'REJECTED' THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN status = 'DEFERRED' THEN 1 ELSE 0 END), 0)
           FROM curation_records",
          [],
          |row| {
            Ok([row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?])
          },
        )?)
      })
      .await?;

    let [total, pending, accepted, rejected, deferred] =
      counts.map(|n| n.max(0) as u64);
    tracing::trace!(total, pending, accepted, rejected, deferred, "stats read");
    Ok(StoreStats { total, pending, accepted, rejected, deferred })
  }
}
