//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use sieve_core::{
  decision::{CurationStatus, DecisionKind, NewDecision},
  lifecycle,
  record::{
    Assertion, AssertionProvenance, ConcordanceEvidence, CurationRecord,
    EvidenceDetail, EvidenceItem, LiteratureEvidence, SourceType,
  },
  store::{CurationStore, StoreStats},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(id: &str) -> CurationRecord {
  let mut assertion =
    Assertion::new("MONDO:0004979", "rdfs:subClassOf", "MONDO:0005275").unwrap();
  assertion.subject_label = Some("asthma".into());
  assertion.object_label = Some("lower respiratory tract disease".into());
  CurationRecord::new(id, assertion).unwrap()
}

fn rich_record(id: &str) -> CurationRecord {
  let mut r = record(id);
  r.provenance = Some(AssertionProvenance {
    attributed_to:       Some("orcid:0000-0001-1111-1111".into()),
    attributed_to_label: Some("A. Curator".into()),
    generated_at:        NaiveDate::from_ymd_opt(2024, 3, 1),
    source_version:      Some("2024-03-01".into()),
    source_uri:          None,
  });
  let mut concordance = EvidenceItem::new(
    "ev-1",
    EvidenceDetail::Concordance(ConcordanceEvidence {
      source_name: Some("DOID".into()),
      source_type: Some(SourceType::Ontology),
      source_subject_id: Some("DOID:2841".into()),
      ..Default::default()
    }),
  );
  concordance.eco_code = Some("ECO:0000305".into());
  concordance.strength = 0.8;
  let literature = EvidenceItem::new(
    "ev-2",
    EvidenceDetail::Literature(LiteratureEvidence {
      publication_id: Some("PMID:12345678".into()),
      ..Default::default()
    }),
  );
  r.evidence_items = vec![concordance, literature];
  r.source_artifact_uri = Some("file:///inbox/asthma.yaml".into());
  r
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_round_trips_every_field() {
  let s = store().await;
  let r = rich_record("rec-1");
  s.insert_record(r.clone()).await.unwrap();

  let fetched = s.get_record("rec-1").await.unwrap().unwrap();
  assert_eq!(fetched, r);
  assert_eq!(fetched.evidence_items[0].id, "ev-1");
  assert_eq!(fetched.evidence_items[1].id, "ev-2");
}

#[tokio::test]
async fn absent_and_empty_provenance_stay_distinct() {
  let s = store().await;
  let mut with_empty = record("empty");
  with_empty.provenance = Some(AssertionProvenance::default());
  s.insert_record(record("none")).await.unwrap();
  s.insert_record(with_empty).await.unwrap();

  let none = s.get_record("none").await.unwrap().unwrap();
  let empty = s.get_record("empty").await.unwrap().unwrap();
  assert!(none.provenance.is_none());
  assert_eq!(empty.provenance, Some(AssertionProvenance::default()));
}

#[tokio::test]
async fn get_record_missing_returns_none() {
  let s = store().await;
  assert!(s.get_record("nope").await.unwrap().is_none());
  assert!(!s.record_exists("nope").await.unwrap());
}

#[tokio::test]
async fn duplicate_insert_is_an_error() {
  let s = store().await;
  s.insert_record(record("rec-1")).await.unwrap();
  let err = s.insert_record(record("rec-1")).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert_eq!(s.get_all_records().await.unwrap().len(), 1);
}

#[tokio::test]
async fn listings_are_newest_first() {
  let s = store().await;
  for id in ["first", "second", "third"] {
    s.insert_record(record(id)).await.unwrap();
  }

  let ids: Vec<_> = s
    .get_all_records()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(ids, ["third", "second", "first"]);

  let pending: Vec<_> = s
    .get_records_by_status(CurationStatus::Pending)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(pending, ids);
}

#[tokio::test]
async fn identical_timestamps_fall_back_to_insertion_order() {
  let s = store().await;
  let a = record("a");
  let mut b = record("b");
  b.created_at = a.created_at;
  b.updated_at = a.updated_at;
  s.insert_record(a).await.unwrap();
  s.insert_record(b).await.unwrap();

  let all = s.get_all_records().await.unwrap();
  assert_eq!(all[0].id, "b");
  assert_eq!(all[1].id, "a");
}

// ─── Decisions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn decision_updates_status_with_its_row() {
  let s = store().await;
  lifecycle::create_record(&s, record("rec-1")).await.unwrap();
  let before = s.get_record("rec-1").await.unwrap().unwrap();

  let applied = lifecycle::apply_decision(
    &s,
    NewDecision::new("rec-1", "orcid:0000-0001-1111-1111", DecisionKind::Accept)
      .with_curator_name("A. Curator"),
  )
  .await
  .unwrap();

  let after = s.get_record("rec-1").await.unwrap().unwrap();
  assert_eq!(after.status, CurationStatus::Accepted);
  assert!(after.updated_at >= before.updated_at);
  assert_eq!(after.created_at, before.created_at);

  let history = s.get_decisions_for_record("rec-1").await.unwrap();
  assert_eq!(history, vec![applied]);
}

#[tokio::test]
async fn decision_for_missing_record_writes_nothing() {
  let s = store().await;
  let decision = sieve_core::decision::CurationDecision {
    id:           "dec-1".into(),
    record_id:    "ghost".into(),
    curator_id:   "orcid:x".into(),
    curator_name: None,
    decision:     DecisionKind::Accept,
    rationale:    None,
    decided_at:   chrono::Utc::now(),
  };

  let err = s.record_decision(decision).await.unwrap_err();
  assert!(matches!(err, Error::RecordNotFound(ref id) if id == "ghost"));
  assert!(s.get_decisions_for_record("ghost").await.unwrap().is_empty());
}

#[tokio::test]
async fn lifecycle_reports_missing_record_as_reference_error() {
  let s = store().await;
  let err = lifecycle::apply_decision(
    &s,
    NewDecision::new("ghost", "orcid:x", DecisionKind::Defer),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, sieve_core::Error::RecordNotFound(_)));
}

#[tokio::test]
async fn reject_without_rationale_leaves_row_untouched() {
  let s = store().await;
  lifecycle::create_record(&s, record("rec-1")).await.unwrap();
  let before = s.get_record("rec-1").await.unwrap().unwrap();

  let err = lifecycle::apply_decision(
    &s,
    NewDecision::new("rec-1", "orcid:x", DecisionKind::Reject).with_rationale("  "),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, sieve_core::Error::Validation(_)));

  assert_eq!(s.get_record("rec-1").await.unwrap().unwrap(), before);
  assert!(s.get_decisions_for_record("rec-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn decision_history_is_newest_first_and_latest_wins() {
  let s = store().await;
  lifecycle::create_record(&s, record("rec-1")).await.unwrap();

  let defer = lifecycle::apply_decision(
    &s,
    NewDecision::new("rec-1", "orcid:a", DecisionKind::Defer),
  )
  .await
  .unwrap();
  let reject = lifecycle::apply_decision(
    &s,
    NewDecision::new("rec-1", "orcid:b", DecisionKind::Reject)
      .with_rationale("not supported by the cited mapping"),
  )
  .await
  .unwrap();

  let history = lifecycle::decisions_for(&s, "rec-1").await.unwrap();
  assert_eq!(history, vec![reject.clone(), defer]);
  assert_eq!(
    lifecycle::current_decision(&s, "rec-1").await.unwrap(),
    Some(reject)
  );

  let r = s.get_record("rec-1").await.unwrap().unwrap();
  assert_eq!(r.status, CurationStatus::Rejected);
}

#[tokio::test]
async fn history_follows_commit_order_not_decided_at() {
  let s = store().await;
  lifecycle::create_record(&s, record("rec-1")).await.unwrap();

  let stamped = chrono::Utc::now();
  let accept = sieve_core::decision::CurationDecision {
    id:           "dec-early-commit".into(),
    record_id:    "rec-1".into(),
    curator_id:   "orcid:a".into(),
    curator_name: None,
    decision:     DecisionKind::Accept,
    rationale:    None,
    decided_at:   stamped,
  };
  // Stamped first but committed second, as a slower writer would.
  let reject = sieve_core::decision::CurationDecision {
    id:         "dec-late-commit".into(),
    curator_id: "orcid:b".into(),
    decision:   DecisionKind::Reject,
    decided_at: stamped - chrono::Duration::seconds(5),
    ..accept.clone()
  };
  s.record_decision(accept.clone()).await.unwrap();
  s.record_decision(reject.clone()).await.unwrap();

  let history = s.get_decisions_for_record("rec-1").await.unwrap();
  assert_eq!(history, vec![reject.clone(), accept]);
  assert_eq!(
    lifecycle::current_decision(&s, "rec-1").await.unwrap(),
    Some(reject)
  );
  let r = s.get_record("rec-1").await.unwrap().unwrap();
  assert_eq!(r.status, CurationStatus::Rejected);
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_on_empty_store_are_zero() {
  let s = store().await;
  let stats = s.get_stats().await.unwrap();
  assert_eq!(stats, StoreStats::default());
}

#[tokio::test]
async fn stats_and_status_filter_follow_decisions() {
  let s = store().await;
  for id in ["a", "b", "c", "d"] {
    lifecycle::create_record(&s, record(id)).await.unwrap();
  }
  lifecycle::apply_decision(&s, NewDecision::new("a", "orcid:x", DecisionKind::Accept))
    .await
    .unwrap();
  lifecycle::apply_decision(&s, NewDecision::new("b", "orcid:x", DecisionKind::Defer))
    .await
    .unwrap();
  lifecycle::apply_decision(&s, NewDecision::new("c", "orcid:x", DecisionKind::Accept))
    .await
    .unwrap();

  let stats = lifecycle::stats(&s).await.unwrap();
  assert_eq!(stats.total, 4);
  assert_eq!(stats.pending, 1);
  assert_eq!(stats.accepted, 2);
  assert_eq!(stats.rejected, 0);
  assert_eq!(stats.deferred, 1);

  let accepted: Vec<_> = s
    .get_records_by_status(CurationStatus::Accepted)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(accepted, ["c", "a"]);
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("curation.sqlite3");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    lifecycle::create_record(&s, rich_record("rec-1")).await.unwrap();
    lifecycle::apply_decision(
      &s,
      NewDecision::new("rec-1", "orcid:x", DecisionKind::Accept),
    )
    .await
    .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let r = s.get_record("rec-1").await.unwrap().unwrap();
  assert_eq!(r.status, CurationStatus::Accepted);
  assert_eq!(r.evidence_items.len(), 2);
}
