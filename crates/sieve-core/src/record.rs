//! Curation records — the aggregate root of the Sieve store.
//!
//! A record wraps one candidate assertion (a subject–predicate–object
//! triple), optional provenance describing where the assertion came from, and
//! the evidence a curator weighs before deciding. Records are created once by
//! ingestion and afterwards only their `status` / `updated_at` move, and only
//! through [`crate::lifecycle::apply_decision`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, decision::CurationStatus};

/// Artifact type stamped on records whose description does not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "YAML_FILE";

/// Generate a fresh record or evidence identifier (`cura:` + 12 hex chars).
pub fn generate_id() -> String {
  let hex = Uuid::new_v4().simple().to_string();
  format!("cura:{}", &hex[..12])
}

fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::missing(field));
  }
  Ok(())
}

// ─── Assertion ───────────────────────────────────────────────────────────────

/// The statement under review. Identity is structural: two assertions with
/// the same subject, predicate and object are the same assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
  /// CURIE or full URI.
  pub subject_id:      String,
  pub subject_label:   Option<String>,
  pub predicate:       String,
  pub predicate_label: Option<String>,
  pub object_id:       String,
  pub object_label:    Option<String>,
}

impl Assertion {
  /// Build an unlabelled assertion, rejecting empty identifiers.
  pub fn new(
    subject_id: impl Into<String>,
    predicate: impl Into<String>,
    object_id: impl Into<String>,
  ) -> Result<Self> {
    let assertion = Self {
      subject_id:      subject_id.into(),
      subject_label:   None,
      predicate:       predicate.into(),
      predicate_label: None,
      object_id:       object_id.into(),
      object_label:    None,
    };
    assertion.validate()?;
    Ok(assertion)
  }

  pub fn validate(&self) -> Result<()> {
    require("assertion.subject_id", &self.subject_id)?;
    require("assertion.predicate", &self.predicate)?;
    require("assertion.object_id", &self.object_id)
  }

  /// `(subject, predicate, object)` as borrowed strings.
  pub fn triple(&self) -> (&str, &str, &str) {
    (&self.subject_id, &self.predicate, &self.object_id)
  }
}

// ─── Provenance ──────────────────────────────────────────────────────────────

/// Where an assertion originated. Descriptive only; never changes after
/// ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssertionProvenance {
  pub attributed_to:       Option<String>,
  pub attributed_to_label: Option<String>,
  pub generated_at:        Option<NaiveDate>,
  pub source_version:      Option<String>,
  pub source_uri:          Option<String>,
}

impl AssertionProvenance {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

// ─── Evidence enumerations ───────────────────────────────────────────────────

/// The closed set of evidence kinds. Mirrors the tag of [`EvidenceDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
  Concordance,
  Literature,
  ExpertReview,
  Computational,
  Other,
}

impl EvidenceType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Concordance => "CONCORDANCE",
      Self::Literature => "LITERATURE",
      Self::ExpertReview => "EXPERT_REVIEW",
      Self::Computational => "COMPUTATIONAL",
      Self::Other => "OTHER",
    }
  }
}

impl FromStr for EvidenceType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "CONCORDANCE" => Ok(Self::Concordance),
      "LITERATURE" => Ok(Self::Literature),
      "EXPERT_REVIEW" => Ok(Self::ExpertReview),
      "COMPUTATIONAL" => Ok(Self::Computational),
      "OTHER" => Ok(Self::Other),
      other => Err(Error::not_in_set("evidence_type", other)),
    }
  }
}

/// Whether a piece of evidence supports or contradicts the assertion.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceDirection {
  #[default]
  Supports,
  Contradicts,
  Uncertain,
}

impl FromStr for EvidenceDirection {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "SUPPORTS" => Ok(Self::Supports),
      "CONTRADICTS" => Ok(Self::Contradicts),
      "UNCERTAIN" => Ok(Self::Uncertain),
      other => Err(Error::not_in_set("direction", other)),
    }
  }
}

/// The kind of resource a concordance was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
  Ontology,
  Terminology,
  Database,
  Other,
}

impl FromStr for SourceType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "ONTOLOGY" => Ok(Self::Ontology),
      "TERMINOLOGY" => Ok(Self::Terminology),
      "DATABASE" => Ok(Self::Database),
      "OTHER" => Ok(Self::Other),
      other => Err(Error::not_in_set("source_type", other)),
    }
  }
}

// ─── Evidence payloads ───────────────────────────────────────────────────────

/// A mapping found in another ontology or terminology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcordanceEvidence {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source:               Option<String>,
  /// Human-readable source ontology name, e.g. "DOID".
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_name:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_type:          Option<SourceType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub predicate_id:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub predicate_label:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_subject_id:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_subject_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_object_id:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_object_label:  Option<String>,
  /// URI of the SSSOM mapping set the concordance came from.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mapping_set:          Option<String>,
}

/// A publication backing the assertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteratureEvidence {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub publication_id:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub publication_title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quoted_text:       Option<String>,
  /// Where in the publication the quote sits, e.g. "Abstract".
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quote_location:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub explanation:       Option<String>,
}

/// A judgement by a named domain expert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertReviewEvidence {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reviewer_orcid:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reviewer_name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reviewer_affiliation: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reviewed_at:          Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub issue:                Option<String>,
}

/// Output of an automated method (reasoner, matcher, classifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputationalEvidence {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method_uri:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub confidence_score: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parameters:       Option<String>,
}

/// Type-specific evidence fields, tagged by `evidence_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "evidence_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceDetail {
  Concordance(ConcordanceEvidence),
  Literature(LiteratureEvidence),
  ExpertReview(ExpertReviewEvidence),
  Computational(ComputationalEvidence),
  Other,
}

impl EvidenceDetail {
  pub fn evidence_type(&self) -> EvidenceType {
    match self {
      Self::Concordance(_) => EvidenceType::Concordance,
      Self::Literature(_) => EvidenceType::Literature,
      Self::ExpertReview(_) => EvidenceType::ExpertReview,
      Self::Computational(_) => EvidenceType::Computational,
      Self::Other => EvidenceType::Other,
    }
  }
}

fn default_strength() -> f64 { 1.0 }

// ─── EvidenceItem ────────────────────────────────────────────────────────────

/// One piece of evidence, owned exclusively by its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
  pub id:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub eco_code:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub eco_label:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub direction:   EvidenceDirection,
  /// Weight in `0.0..=1.0`.
  #[serde(default = "default_strength")]
  pub strength:    f64,
  #[serde(flatten)]
  pub detail:      EvidenceDetail,
}

impl EvidenceItem {
  /// Evidence of the given kind with all optional fields unset.
  pub fn new(id: impl Into<String>, detail: EvidenceDetail) -> Self {
    Self {
      id: id.into(),
      eco_code: None,
      eco_label: None,
      description: None,
      direction: EvidenceDirection::default(),
      strength: default_strength(),
      detail,
    }
  }

  pub fn evidence_type(&self) -> EvidenceType { self.detail.evidence_type() }

  pub fn as_concordance(&self) -> Option<&ConcordanceEvidence> {
    match &self.detail {
      EvidenceDetail::Concordance(c) => Some(c),
      _ => None,
    }
  }

  pub fn as_literature(&self) -> Option<&LiteratureEvidence> {
    match &self.detail {
      EvidenceDetail::Literature(l) => Some(l),
      _ => None,
    }
  }

  pub fn as_expert_review(&self) -> Option<&ExpertReviewEvidence> {
    match &self.detail {
      EvidenceDetail::ExpertReview(r) => Some(r),
      _ => None,
    }
  }

  pub fn as_computational(&self) -> Option<&ComputationalEvidence> {
    match &self.detail {
      EvidenceDetail::Computational(c) => Some(c),
      _ => None,
    }
  }

  pub fn validate(&self) -> Result<()> {
    require("evidence.id", &self.id)?;
    if !(0.0..=1.0).contains(&self.strength) {
      return Err(Error::Validation(format!(
        "evidence {} has strength {} outside 0.0..=1.0",
        self.id, self.strength
      )));
    }
    Ok(())
  }
}

// ─── CurationRecord ──────────────────────────────────────────────────────────

/// A candidate assertion with its evidence, awaiting or carrying a curation
/// outcome.
///
/// `status` mirrors the latest [`crate::decision::CurationDecision`] for this
/// record and is PENDING until the first one is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationRecord {
  pub id:                   String,
  pub assertion:            Assertion,
  pub provenance:           Option<AssertionProvenance>,
  /// Display order is insertion order.
  pub evidence_items:       Vec<EvidenceItem>,
  pub source_artifact_uri:  Option<String>,
  pub source_artifact_type: Option<String>,
  pub status:               CurationStatus,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl CurationRecord {
  /// A fresh PENDING record with no provenance or evidence, stamped now.
  pub fn new(id: impl Into<String>, assertion: Assertion) -> Result<Self> {
    let now = Utc::now();
    let record = Self {
      id: id.into(),
      assertion,
      provenance: None,
      evidence_items: Vec::new(),
      source_artifact_uri: None,
      source_artifact_type: Some(DEFAULT_ARTIFACT_TYPE.to_owned()),
      status: CurationStatus::Pending,
      created_at: now,
      updated_at: now,
    };
    record.validate()?;
    Ok(record)
  }

  /// Structural validation: non-empty identifiers and well-formed evidence.
  pub fn validate(&self) -> Result<()> {
    require("id", &self.id)?;
    self.assertion.validate()?;
    for item in &self.evidence_items {
      item.validate()?;
    }
    Ok(())
  }

  /// Evidence items of one kind, in display order.
  pub fn evidence_of(
    &self,
    kind: EvidenceType,
  ) -> impl Iterator<Item = &EvidenceItem> + '_ {
    self
      .evidence_items
      .iter()
      .filter(move |e| e.evidence_type() == kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generated_ids_are_prefixed_and_distinct() {
    let a = generate_id();
    let b = generate_id();
    assert!(a.starts_with("cura:"));
    assert_eq!(a.len(), "cura:".len() + 12);
    assert_ne!(a, b);
  }

  #[test]
  fn assertion_requires_all_three_identifiers() {
    assert!(Assertion::new("MONDO:1", "rdfs:subClassOf", "MONDO:2").is_ok());
    let err = Assertion::new("MONDO:1", "  ", "MONDO:2").unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("predicate")));
  }

  #[test]
  fn record_defaults_to_pending() {
    let assertion =
      Assertion::new("MONDO:1", "rdfs:subClassOf", "MONDO:2").unwrap();
    let record = CurationRecord::new("rec-1", assertion).unwrap();
    assert_eq!(record.status, CurationStatus::Pending);
    assert_eq!(record.source_artifact_type.as_deref(), Some("YAML_FILE"));
    assert_eq!(record.created_at, record.updated_at);
  }

  #[test]
  fn record_rejects_empty_id() {
    let assertion =
      Assertion::new("MONDO:1", "rdfs:subClassOf", "MONDO:2").unwrap();
    assert!(matches!(
      CurationRecord::new("", assertion),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn evidence_type_outside_set_is_rejected() {
    assert_eq!(
      "EXPERT_REVIEW".parse::<EvidenceType>().unwrap(),
      EvidenceType::ExpertReview
    );
    assert!(matches!(
      "HEARSAY".parse::<EvidenceType>(),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn evidence_json_is_flat_and_tagged() {
    let mut item = EvidenceItem::new(
      "ev-1",
      EvidenceDetail::Literature(LiteratureEvidence {
        publication_id: Some("PMID:12345".into()),
        ..Default::default()
      }),
    );
    item.eco_code = Some("ECO:0000033".into());

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["evidence_type"], "LITERATURE");
    assert_eq!(json["publication_id"], "PMID:12345");
    assert_eq!(json["direction"], "SUPPORTS");

    let back: EvidenceItem = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
    assert_eq!(
      back.as_literature().unwrap().publication_id.as_deref(),
      Some("PMID:12345")
    );
    assert!(back.as_concordance().is_none());
  }

  #[test]
  fn evidence_strength_must_be_a_fraction() {
    let mut item = EvidenceItem::new("ev-1", EvidenceDetail::Other);
    item.strength = 1.5;
    assert!(matches!(item.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn evidence_of_filters_by_type() {
    let assertion =
      Assertion::new("MONDO:1", "rdfs:subClassOf", "MONDO:2").unwrap();
    let mut record = CurationRecord::new("rec-1", assertion).unwrap();
    record.evidence_items = vec![
      EvidenceItem::new("a", EvidenceDetail::Other),
      EvidenceItem::new(
        "b",
        EvidenceDetail::Literature(LiteratureEvidence::default()),
      ),
      EvidenceItem::new("c", EvidenceDetail::Other),
    ];
    let ids: Vec<_> = record
      .evidence_of(EvidenceType::Other)
      .map(|e| e.id.as_str())
      .collect();
    assert_eq!(ids, ["a", "c"]);
  }
}
