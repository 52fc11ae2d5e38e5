//! Reading records and recording decisions from the terminal.

use std::fmt::Write as _;

use anyhow::{Context as _, bail};
use sieve_core::{
  decision::{CurationDecision, CurationStatus, DecisionKind, NewDecision},
  lifecycle,
  record::CurationRecord,
  store::CurationStore,
};

// ─── List ─────────────────────────────────────────────────────────────────────

pub async fn list<S>(store: &S, status: Option<CurationStatus>) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let records = match status {
    Some(status) => lifecycle::records_by_status(store, status).await?,
    None => lifecycle::all_records(store).await?,
  };
  if records.is_empty() {
    return Ok("no records\n".to_owned());
  }

  let mut out = String::new();
  for r in &records {
    let (s, p, o) = r.assertion.triple();
    let _ = writeln!(out, "{:<9} {}  {s} {p} {o}", r.status.as_str(), r.id);
  }
  Ok(out)
}

// ─── Show ─────────────────────────────────────────────────────────────────────

pub async fn show<S>(store: &S, id: &str) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let Some(record) = lifecycle::get_record(store, id).await? else {
    bail!("record {id} not found");
  };
  let history = lifecycle::decisions_for(store, id).await?;
  let turtle = sieve_rdf::record_turtle(&record)
    .with_context(|| format!("failed to render record {id}"))?;
  Ok(describe(&record, &history, &turtle))
}

fn describe(record: &CurationRecord, history: &[CurationDecision], turtle: &str) -> String {
  let a = &record.assertion;
  let labelled = |id: &str, label: &Option<String>| match label {
    Some(l) => format!("{id} ({l})"),
    None => id.to_owned(),
  };

  let mut out = String::new();
  let _ = writeln!(out, "id:        {}", record.id);
  let _ = writeln!(out, "status:    {}", record.status);
  let _ = writeln!(out, "subject:   {}", labelled(&a.subject_id, &a.subject_label));
  let _ = writeln!(out, "predicate: {}", labelled(&a.predicate, &a.predicate_label));
  let _ = writeln!(out, "object:    {}", labelled(&a.object_id, &a.object_label));
  if let Some(uri) = &record.source_artifact_uri {
    let _ = writeln!(out, "source:    {uri}");
  }
  let _ = writeln!(out, "evidence:  {} item(s)", record.evidence_items.len());
  for item in &record.evidence_items {
    let _ = writeln!(out, "  - {} [{}]", item.id, item.evidence_type().as_str());
  }
  let _ = writeln!(out, "created:   {}", record.created_at.to_rfc3339());

  if history.is_empty() {
    out.push_str("decisions: none\n");
  } else {
    out.push_str("decisions:\n");
    for d in history {
      let _ = write!(out, "  {} {} by {}", d.decided_at.to_rfc3339(), d.decision, d.curator_id);
      if let Some(name) = &d.curator_name {
        let _ = write!(out, " ({name})");
      }
      if let Some(rationale) = &d.rationale {
        let _ = write!(out, ": {rationale}");
      }
      out.push('\n');
    }
  }

  out.push('\n');
  out.push_str(turtle);
  out
}

// ─── Decide ───────────────────────────────────────────────────────────────────

pub async fn decide<S>(
  store: &S,
  id: String,
  decision: DecisionKind,
  curator: String,
  name: Option<String>,
  rationale: Option<String>,
) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let input = NewDecision {
    record_id:    id,
    curator_id:   curator,
    curator_name: name,
    decision,
    rationale,
  };
  let applied = lifecycle::apply_decision(store, input).await?;
  Ok(format!(
    "{} -> {} (decision {})\n",
    applied.record_id,
    applied.resulting_status(),
    applied.id
  ))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

pub async fn stats<S>(store: &S) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let stats = lifecycle::stats(store).await?;
  let mut out = format!("{:<9} {}\n", "TOTAL", stats.total);
  for status in CurationStatus::ALL {
    let _ = writeln!(out, "{:<9} {}", status.as_str(), stats.count(status));
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use sieve_core::record::Assertion;
  use sieve_store_sqlite::SqliteStore;

  use super::*;

  async fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let assertion =
      Assertion::new("MONDO:0004979", "rdfs:subClassOf", "MONDO:0005275").unwrap();
    let record = CurationRecord::new("rec-1", assertion).unwrap();
    lifecycle::create_record(&store, record).await.unwrap();
    store
  }

  #[tokio::test]
  async fn list_shows_status_and_triple() {
    let store = seeded().await;
    assert_eq!(
      list(&store, None).await.unwrap(),
      "PENDING   rec-1  MONDO:0004979 rdfs:subClassOf MONDO:0005275\n"
    );
    assert_eq!(
      list(&store, Some(CurationStatus::Accepted)).await.unwrap(),
      "no records\n"
    );
  }

  #[tokio::test]
  async fn decide_then_show_history() {
    let store = seeded().await;
    let line = decide(
      &store,
      "rec-1".to_owned(),
      DecisionKind::Reject,
      "orcid:0000-0001-1111-1111".to_owned(),
      Some("A. Curator".to_owned()),
      Some("wrong parent".to_owned()),
    )
    .await
    .unwrap();
    assert!(line.starts_with("rec-1 -> REJECTED (decision "));

    let text = show(&store, "rec-1").await.unwrap();
    assert!(text.contains("status:    REJECTED"));
    assert!(text.contains("REJECT by orcid:0000-0001-1111-1111 (A. Curator): wrong parent"));
    assert!(text.contains("<http://purl.obolibrary.org/obo/MONDO_0004979>"));
  }

  #[tokio::test]
  async fn reject_without_rationale_is_refused() {
    let store = seeded().await;
    let err = decide(
      &store,
      "rec-1".to_owned(),
      DecisionKind::Reject,
      "orcid:x".to_owned(),
      None,
      None,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("rationale"));
  }

  #[tokio::test]
  async fn show_unknown_record_fails() {
    let store = seeded().await;
    assert!(show(&store, "nope").await.is_err());
  }

  #[tokio::test]
  async fn stats_table() {
    let store = seeded().await;
    assert_eq!(
      stats(&store).await.unwrap(),
      "TOTAL     1\nPENDING   1\nACCEPTED  0\nREJECTED  0\nDEFERRED  0\n"
    );
  }
}
