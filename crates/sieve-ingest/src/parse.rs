//! YAML record descriptions and their conversion into [`CurationRecord`]s.
//!
//! Descriptions are first decoded into loose `Raw*` structs where every
//! field is optional, then checked and converted field by field so that a
//! missing assertion is reported as [`Error::Parse`] and a bad enumeration
//! value as a core validation error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_yaml::Value;
use sieve_core::{
  decision::CurationStatus,
  record::{
    Assertion, AssertionProvenance, ComputationalEvidence, ConcordanceEvidence,
    CurationRecord, DEFAULT_ARTIFACT_TYPE, EvidenceDetail, EvidenceDirection,
    EvidenceItem, EvidenceType, ExpertReviewEvidence, LiteratureEvidence,
    SourceType, generate_id,
  },
};

use crate::{Error, Result};

// ─── Raw description types ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct RawRecord {
  id:                   Option<String>,
  assertion:            Option<RawAssertion>,
  provenance:           Option<RawProvenance>,
  #[serde(alias = "evidence")]
  evidence_items:       Option<Vec<RawEvidence>>,
  source_artifact_uri:  Option<String>,
  source_artifact_type: Option<String>,
  status:               Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAssertion {
  subject_id:      Option<String>,
  subject_label:   Option<String>,
  predicate:       Option<String>,
  predicate_label: Option<String>,
  object_id:       Option<String>,
  object_label:    Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProvenance {
  attributed_to:       Option<String>,
  attributed_to_label: Option<String>,
  generated_at:        Option<String>,
  source_version:      Option<String>,
  source_uri:          Option<String>,
}

/// One evidence entry with every type-specific field side by side, as it is
/// written in description files.
#[derive(Debug, Default, Deserialize)]
struct RawEvidence {
  id:                   Option<String>,
  evidence_type:        Option<String>,
  eco_code:             Option<String>,
  eco_label:            Option<String>,
  description:          Option<String>,
  direction:            Option<String>,
  #[serde(alias = "evidence_strength")]
  strength:             Option<f64>,

  // concordance
  source:               Option<String>,
  source_name:          Option<String>,
  source_type:          Option<String>,
  predicate_id:         Option<String>,
  predicate_label:      Option<String>,
  source_subject_id:    Option<String>,
  source_subject_label: Option<String>,
  source_object_id:     Option<String>,
  source_object_label:  Option<String>,
  mapping_set:          Option<String>,

  // literature
  publication_id:       Option<String>,
  publication_title:    Option<String>,
  quoted_text:          Option<String>,
  quote_location:       Option<String>,
  explanation:          Option<String>,

  // expert review
  reviewer_orcid:       Option<String>,
  reviewer_name:        Option<String>,
  reviewer_affiliation: Option<String>,
  reviewed_at:          Option<String>,
  issue:                Option<String>,

  // computational
  method:               Option<String>,
  method_uri:           Option<String>,
  confidence_score:     Option<f64>,
  parameters:           Option<String>,
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// Split `text` into individual record descriptions.
///
/// Accepts a single mapping, a top-level sequence of mappings, or several
/// `---`-separated documents (each of which may itself be a sequence). Empty
/// documents are dropped.
pub fn documents(text: &str) -> Result<Vec<Value>> {
  let mut out = Vec::new();
  for doc in serde_yaml::Deserializer::from_str(text) {
    match Value::deserialize(doc)? {
      Value::Null => {}
      Value::Sequence(items) => out.extend(items),
      other => out.push(other),
    }
  }
  Ok(out)
}

// ─── Conversion ──────────────────────────────────────────────────────────────

/// Convert one description into a fresh PENDING record.
///
/// Missing record and evidence ids are generated; `source_artifact_type`
/// defaults to [`DEFAULT_ARTIFACT_TYPE`]; both timestamps are set to now.
pub fn parse(description: Value) -> Result<CurationRecord> {
  let raw: RawRecord = serde_yaml::from_value(description)?;

  let assertion = raw
    .assertion
    .ok_or_else(|| Error::Parse("missing `assertion` block".to_owned()))?;
  let assertion = convert_assertion(assertion)?;

  let id = present(raw.id).unwrap_or_else(generate_id);

  if let Some(status) = raw.status.as_deref() {
    let status: CurationStatus = status.parse()?;
    if status != CurationStatus::Pending {
      tracing::warn!(
        record_id = %id,
        %status,
        "ignoring input status; records are created PENDING"
      );
    }
  }

  let evidence_items = raw
    .evidence_items
    .unwrap_or_default()
    .into_iter()
    .map(convert_evidence)
    .collect::<Result<Vec<_>>>()?;

  let now = Utc::now();
  let record = CurationRecord {
    id,
    assertion,
    provenance: raw.provenance.map(convert_provenance).transpose()?,
    evidence_items,
    source_artifact_uri: present(raw.source_artifact_uri),
    source_artifact_type: Some(
      present(raw.source_artifact_type)
        .unwrap_or_else(|| DEFAULT_ARTIFACT_TYPE.to_owned()),
    ),
    status: CurationStatus::Pending,
    created_at: now,
    updated_at: now,
  };
  record.validate()?;
  Ok(record)
}

fn convert_assertion(raw: RawAssertion) -> Result<Assertion> {
  let required = |field: &str, value: Option<String>| {
    present(value).ok_or_else(|| {
      Error::Parse(format!("assertion is missing required field `{field}`"))
    })
  };

  Ok(Assertion {
    subject_id:      required("subject_id", raw.subject_id)?,
    subject_label:   raw.subject_label,
    predicate:       required("predicate", raw.predicate)?,
    predicate_label: raw.predicate_label,
    object_id:       required("object_id", raw.object_id)?,
    object_label:    raw.object_label,
  })
}

fn convert_provenance(raw: RawProvenance) -> Result<AssertionProvenance> {
  Ok(AssertionProvenance {
    attributed_to:       raw.attributed_to,
    attributed_to_label: raw.attributed_to_label,
    generated_at:        raw
      .generated_at
      .as_deref()
      .map(|s| parse_date("provenance.generated_at", s))
      .transpose()?,
    source_version:      raw.source_version,
    source_uri:          raw.source_uri,
  })
}

fn convert_evidence(raw: RawEvidence) -> Result<EvidenceItem> {
  let kind = match raw.evidence_type.as_deref() {
    Some(s) => s.parse()?,
    None => EvidenceType::Other,
  };

  let detail = match kind {
    EvidenceType::Concordance => EvidenceDetail::Concordance(ConcordanceEvidence {
      source:               raw.source,
      source_name:          raw.source_name,
      source_type:          raw
        .source_type
        .as_deref()
        .map(str::parse::<SourceType>)
        .transpose()?,
      predicate_id:         raw.predicate_id,
      predicate_label:      raw.predicate_label,
      source_subject_id:    raw.source_subject_id,
      source_subject_label: raw.source_subject_label,
      source_object_id:     raw.source_object_id,
      source_object_label:  raw.source_object_label,
      mapping_set:          raw.mapping_set,
    }),
    EvidenceType::Literature => EvidenceDetail::Literature(LiteratureEvidence {
      publication_id:    raw.publication_id,
      publication_title: raw.publication_title,
      quoted_text:       raw.quoted_text,
      quote_location:    raw.quote_location,
      explanation:       raw.explanation,
    }),
    EvidenceType::ExpertReview => {
      EvidenceDetail::ExpertReview(ExpertReviewEvidence {
        reviewer_orcid:       raw.reviewer_orcid,
        reviewer_name:        raw.reviewer_name,
        reviewer_affiliation: raw.reviewer_affiliation,
        reviewed_at:          raw
          .reviewed_at
          .as_deref()
          .map(|s| parse_date("evidence.reviewed_at", s))
          .transpose()?,
        issue:                raw.issue,
      })
    }
    EvidenceType::Computational => {
      EvidenceDetail::Computational(ComputationalEvidence {
        method:           raw.method,
        method_uri:       raw.method_uri,
        confidence_score: raw.confidence_score,
        parameters:       raw.parameters,
      })
    }
    EvidenceType::Other => EvidenceDetail::Other,
  };

  let mut item = EvidenceItem::new(present(raw.id).unwrap_or_else(generate_id), detail);
  item.eco_code = raw.eco_code;
  item.eco_label = raw.eco_label;
  item.description = raw.description;
  item.direction = raw
    .direction
    .as_deref()
    .map(str::parse::<EvidenceDirection>)
    .transpose()?
    .unwrap_or_default();
  if let Some(strength) = raw.strength {
    item.strength = if strength.is_nan() { 1.0 } else { strength.clamp(0.0, 1.0) };
  }
  Ok(item)
}

/// `Some` only for strings with visible content.
fn present(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.trim().is_empty())
}

/// Accept a plain ISO date or a full RFC 3339 timestamp (truncated to its
/// UTC date).
fn parse_date(field: &str, s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  if let Ok(date) = s.parse::<NaiveDate>() {
    return Ok(date);
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|_| {
      sieve_core::Error::Validation(format!(
        "`{field}` is not an ISO 8601 date: {s:?}"
      ))
      .into()
    })
}
