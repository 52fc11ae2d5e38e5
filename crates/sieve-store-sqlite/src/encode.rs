//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nine-digit
//! fraction, so string order equals time order. Dates are ISO 8601. The
//! evidence list is stored as a compact JSON array.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sieve_core::{
  decision::{CurationDecision, CurationStatus, DecisionKind},
  record::{Assertion, AssertionProvenance, CurationRecord, EvidenceItem},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn encode_status(s: CurationStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<CurationStatus> { Ok(s.parse()?) }

pub fn encode_decision_kind(k: DecisionKind) -> &'static str { k.as_str() }

pub fn decode_decision_kind(s: &str) -> Result<DecisionKind> { Ok(s.parse()?) }

// ─── Evidence ────────────────────────────────────────────────────────────────

pub fn encode_evidence(items: &[EvidenceItem]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_evidence(s: &str) -> Result<Vec<EvidenceItem>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `curation_records` SELECT, in [`RawRecord`]
/// field order.
pub const RECORD_COLUMNS: &str = "
  id,
  assertion_subject_id, assertion_subject_label,
  assertion_predicate, assertion_predicate_label,
  assertion_object_id, assertion_object_label,
  provenance_present,
  provenance_attributed_to, provenance_attributed_to_label,
  provenance_generated_at, provenance_source_version, provenance_source_uri,
  evidence_items, source_artifact_uri, source_artifact_type,
  status, created_at, updated_at";

/// Raw values read directly from (or bound to) a `curation_records` row.
pub struct RawRecord {
  pub id:                             String,
  pub assertion_subject_id:           String,
  pub assertion_subject_label:        Option<String>,
  pub assertion_predicate:            String,
  pub assertion_predicate_label:      Option<String>,
  pub assertion_object_id:            String,
  pub assertion_object_label:         Option<String>,
  pub provenance_present:             bool,
  pub provenance_attributed_to:       Option<String>,
  pub provenance_attributed_to_label: Option<String>,
  pub provenance_generated_at:        Option<String>,
  pub provenance_source_version:      Option<String>,
  pub provenance_source_uri:          Option<String>,
  pub evidence_items:                 String,
  pub source_artifact_uri:            Option<String>,
  pub source_artifact_type:           Option<String>,
  pub status:                         String,
  pub created_at:                     String,
  pub updated_at:                     String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                             row.get(0)?,
      assertion_subject_id:           row.get(1)?,
      assertion_subject_label:        row.get(2)?,
      assertion_predicate:            row.get(3)?,
      assertion_predicate_label:      row.get(4)?,
      assertion_object_id:            row.get(5)?,
      assertion_object_label:         row.get(6)?,
      provenance_present:             row.get(7)?,
      provenance_attributed_to:       row.get(8)?,
      provenance_attributed_to_label: row.get(9)?,
      provenance_generated_at:        row.get(10)?,
      provenance_source_version:      row.get(11)?,
      provenance_source_uri:          row.get(12)?,
      evidence_items:                 row.get(13)?,
      source_artifact_uri:            row.get(14)?,
      source_artifact_type:           row.get(15)?,
      status:                         row.get(16)?,
      created_at:                     row.get(17)?,
      updated_at:                     row.get(18)?,
    })
  }

  pub fn from_record(record: &CurationRecord) -> Result<Self> {
    let prov = record.provenance.as_ref();
    let a = &record.assertion;
    Ok(Self {
      id:                             record.id.clone(),
      assertion_subject_id:           a.subject_id.clone(),
      assertion_subject_label:        a.subject_label.clone(),
      assertion_predicate:            a.predicate.clone(),
      assertion_predicate_label:      a.predicate_label.clone(),
      assertion_object_id:            a.object_id.clone(),
      assertion_object_label:         a.object_label.clone(),
      provenance_present:             prov.is_some(),
      provenance_attributed_to:       prov.and_then(|p| p.attributed_to.clone()),
      provenance_attributed_to_label: prov
        .and_then(|p| p.attributed_to_label.clone()),
      provenance_generated_at:        prov
        .and_then(|p| p.generated_at)
        .map(encode_date),
      provenance_source_version:      prov.and_then(|p| p.source_version.clone()),
      provenance_source_uri:          prov.and_then(|p| p.source_uri.clone()),
      evidence_items:                 encode_evidence(&record.evidence_items)?,
      source_artifact_uri:            record.source_artifact_uri.clone(),
      source_artifact_type:           record.source_artifact_type.clone(),
      status:                         encode_status(record.status).to_owned(),
      created_at:                     encode_dt(record.created_at),
      updated_at:                     encode_dt(record.updated_at),
    })
  }

  pub fn into_record(self) -> Result<CurationRecord> {
    let provenance = if self.provenance_present {
      Some(AssertionProvenance {
        attributed_to:       self.provenance_attributed_to,
        attributed_to_label: self.provenance_attributed_to_label,
        generated_at:        self
          .provenance_generated_at
          .as_deref()
          .map(decode_date)
          .transpose()?,
        source_version:      self.provenance_source_version,
        source_uri:          self.provenance_source_uri,
      })
    } else {
      None
    };

    Ok(CurationRecord {
      id: self.id,
      assertion: Assertion {
        subject_id:      self.assertion_subject_id,
        subject_label:   self.assertion_subject_label,
        predicate:       self.assertion_predicate,
        predicate_label: self.assertion_predicate_label,
        object_id:       self.assertion_object_id,
        object_label:    self.assertion_object_label,
      },
      provenance,
      evidence_items: decode_evidence(&self.evidence_items)?,
      source_artifact_uri: self.source_artifact_uri,
      source_artifact_type: self.source_artifact_type,
      status: decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Column list shared by every `curation_decisions` SELECT.
pub const DECISION_COLUMNS: &str =
  "id, record_id, curator_id, curator_name, decision, rationale, decided_at";

/// Raw strings read directly from a `curation_decisions` row.
pub struct RawDecision {
  pub id:           String,
  pub record_id:    String,
  pub curator_id:   String,
  pub curator_name: Option<String>,
  pub decision:     String,
  pub rationale:    Option<String>,
  pub decided_at:   String,
}

impl RawDecision {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      record_id:    row.get(1)?,
      curator_id:   row.get(2)?,
      curator_name: row.get(3)?,
      decision:     row.get(4)?,
      rationale:    row.get(5)?,
      decided_at:   row.get(6)?,
    })
  }

  pub fn into_decision(self) -> Result<CurationDecision> {
    Ok(CurationDecision {
      id:           self.id,
      record_id:    self.record_id,
      curator_id:   self.curator_id,
      curator_name: self.curator_name,
      decision:     decode_decision_kind(&self.decision)?,
      rationale:    self.rationale,
      decided_at:   decode_dt(&self.decided_at)?,
    })
  }
}
