//! Curation decisions and the status they drive.
//!
//! Decisions are append-only: once written, no field changes and no row is
//! removed. A record may collect several decisions over repeated reviews;
//! its status always reflects the most recent one.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a record stands in the review cycle. PENDING is the only initial
/// state; any decided state can move again through a new decision.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurationStatus {
  #[default]
  Pending,
  Accepted,
  Rejected,
  Deferred,
}

impl CurationStatus {
  pub const ALL: [Self; 4] =
    [Self::Pending, Self::Accepted, Self::Rejected, Self::Deferred];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "PENDING",
      Self::Accepted => "ACCEPTED",
      Self::Rejected => "REJECTED",
      Self::Deferred => "DEFERRED",
    }
  }

  pub fn is_decided(self) -> bool { !matches!(self, Self::Pending) }
}

impl fmt::Display for CurationStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CurationStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_uppercase().as_str() {
      "PENDING" => Ok(Self::Pending),
      "ACCEPTED" => Ok(Self::Accepted),
      "REJECTED" => Ok(Self::Rejected),
      "DEFERRED" => Ok(Self::Deferred),
      _ => Err(Error::not_in_set("status", s)),
    }
  }
}

// ─── Decision kind ───────────────────────────────────────────────────────────

/// What a curator decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
  Accept,
  Reject,
  Defer,
}

impl DecisionKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Accept => "ACCEPT",
      Self::Reject => "REJECT",
      Self::Defer => "DEFER",
    }
  }

  /// The fixed decision → status mapping.
  pub fn resulting_status(self) -> CurationStatus {
    match self {
      Self::Accept => CurationStatus::Accepted,
      Self::Reject => CurationStatus::Rejected,
      Self::Defer => CurationStatus::Deferred,
    }
  }
}

impl fmt::Display for DecisionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for DecisionKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_uppercase().as_str() {
      "ACCEPT" => Ok(Self::Accept),
      "REJECT" => Ok(Self::Reject),
      "DEFER" => Ok(Self::Defer),
      _ => Err(Error::not_in_set("decision", s)),
    }
  }
}

// ─── Decision ────────────────────────────────────────────────────────────────

/// An immutable, persisted curation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationDecision {
  pub id:           String,
  pub record_id:    String,
  /// Curator identifier, typically an ORCID CURIE (`orcid:0000-…`).
  pub curator_id:   String,
  pub curator_name: Option<String>,
  pub decision:     DecisionKind,
  pub rationale:    Option<String>,
  pub decided_at:   DateTime<Utc>,
}

impl CurationDecision {
  pub fn resulting_status(&self) -> CurationStatus {
    self.decision.resulting_status()
  }
}

// ─── NewDecision ─────────────────────────────────────────────────────────────

/// Input to [`crate::lifecycle::apply_decision`].
/// `id` and `decided_at` are assigned when the decision is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDecision {
  pub record_id:    String,
  pub curator_id:   String,
  pub curator_name: Option<String>,
  pub decision:     DecisionKind,
  pub rationale:    Option<String>,
}

impl NewDecision {
  /// Convenience constructor with name and rationale unset.
  pub fn new(
    record_id: impl Into<String>,
    curator_id: impl Into<String>,
    decision: DecisionKind,
  ) -> Self {
    Self {
      record_id: record_id.into(),
      curator_id: curator_id.into(),
      curator_name: None,
      decision,
      rationale: None,
    }
  }

  pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
    self.rationale = Some(rationale.into());
    self
  }

  pub fn with_curator_name(mut self, name: impl Into<String>) -> Self {
    self.curator_name = Some(name.into());
    self
  }

  /// Boundary checks: identifiers present, and REJECT carries a non-blank
  /// rationale.
  pub fn validate(&self) -> Result<()> {
    if self.record_id.trim().is_empty() {
      return Err(Error::missing("record_id"));
    }
    if self.curator_id.trim().is_empty() {
      return Err(Error::missing("curator_id"));
    }
    let has_rationale = self
      .rationale
      .as_deref()
      .is_some_and(|r| !r.trim().is_empty());
    if self.decision == DecisionKind::Reject && !has_rationale {
      return Err(Error::Validation(
        "a REJECT decision requires a rationale".to_owned(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decision_maps_to_fixed_status() {
    assert_eq!(
      DecisionKind::Accept.resulting_status(),
      CurationStatus::Accepted
    );
    assert_eq!(
      DecisionKind::Reject.resulting_status(),
      CurationStatus::Rejected
    );
    assert_eq!(
      DecisionKind::Defer.resulting_status(),
      CurationStatus::Deferred
    );
  }

  #[test]
  fn status_parses_case_insensitively_and_rejects_unknowns() {
    assert_eq!(
      "accepted".parse::<CurationStatus>().unwrap(),
      CurationStatus::Accepted
    );
    assert!(matches!(
      "CONTROVERSIAL".parse::<CurationStatus>(),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn reject_without_rationale_is_invalid() {
    let d = NewDecision::new("rec-1", "orcid:0000-0001", DecisionKind::Reject);
    assert!(matches!(d.validate(), Err(Error::Validation(_))));

    let blank = d.clone().with_rationale("   ");
    assert!(matches!(blank.validate(), Err(Error::Validation(_))));

    let ok = d.with_rationale("wrong parent class");
    assert!(ok.validate().is_ok());
  }

  #[test]
  fn accept_and_defer_need_no_rationale() {
    for kind in [DecisionKind::Accept, DecisionKind::Defer] {
      assert!(NewDecision::new("rec-1", "orcid:x", kind).validate().is_ok());
    }
  }

  #[test]
  fn status_serialises_upper_case() {
    let json = serde_json::to_string(&CurationStatus::Deferred).unwrap();
    assert_eq!(json, "\"DEFERRED\"");
  }
}
