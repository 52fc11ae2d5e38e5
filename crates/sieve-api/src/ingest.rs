//! `POST /ingest` — the body is one or more YAML record descriptions.
//!
//! Responds 200 with the [`BatchOutcome`] even when some descriptions fail;
//! only a body that is not YAML at all is a 400.

use std::sync::Arc;

use axum::{Json, extract::State};
use sieve_core::store::CurationStore;
use sieve_ingest::BatchOutcome;

use crate::error::ApiError;

pub async fn handler<S>(
  State(store): State<Arc<S>>,
  body: String,
) -> Result<Json<BatchOutcome>, ApiError>
where
  S: CurationStore,
{
  let outcome = sieve_ingest::ingest_str(store.as_ref(), &body, "request").await?;
  tracing::info!(
    inserted = outcome.inserted,
    skipped = outcome.skipped,
    failed = outcome.errors.len(),
    "ingest request handled"
  );
  Ok(Json(outcome))
}
