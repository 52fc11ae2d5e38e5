//! Handlers for `/records` and `/stats`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records` | Optional `?status=pending\|accepted\|rejected\|deferred` |
//! | `GET`  | `/records/{id}` | 404 if not found |
//! | `GET`  | `/records/{id}/decisions` | Newest first; 404 if the record is unknown |
//! | `POST` | `/records/{id}/decisions` | Body: [`DecisionBody`]; returns 201 + stored decision |
//! | `GET`  | `/stats` | Counts per status |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use sieve_core::{
  decision::{CurationDecision, CurationStatus, DecisionKind, NewDecision},
  lifecycle,
  record::CurationRecord,
  store::{CurationStore, StoreStats},
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

/// `GET /records[?status=<status>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CurationRecord>>, ApiError>
where
  S: CurationStore,
{
  let records = match params.status.as_deref() {
    Some(s) => {
      let status: CurationStatus =
        s.parse().map_err(|e: sieve_core::Error| ApiError::BadRequest(e.to_string()))?;
      lifecycle::records_by_status(store.as_ref(), status).await?
    }
    None => lifecycle::all_records(store.as_ref()).await?,
  };
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /records/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<CurationRecord>, ApiError>
where
  S: CurationStore,
{
  let record = lifecycle::get_record(store.as_ref(), &id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;
  Ok(Json(record))
}

// ─── Decisions ────────────────────────────────────────────────────────────────

/// `GET /records/{id}/decisions`
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<CurationDecision>>, ApiError>
where
  S: CurationStore,
{
  let exists = store
    .record_exists(&id)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?;
  if !exists {
    return Err(ApiError::NotFound(format!("record {id} not found")));
  }
  Ok(Json(lifecycle::decisions_for(store.as_ref(), &id).await?))
}

/// JSON body accepted by `POST /records/{id}/decisions`.
///
/// `decision` is matched case-insensitively (`accept`, `REJECT`, …).
#[derive(Debug, Deserialize)]
pub struct DecisionBody {
  pub curator_id:   String,
  pub curator_name: Option<String>,
  pub decision:     String,
  pub rationale:    Option<String>,
}

/// `POST /records/{id}/decisions` — returns 201 + the stored decision.
pub async fn decide<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<DecisionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CurationStore,
{
  let kind: DecisionKind = body.decision.parse()?;
  let input = NewDecision {
    record_id:    id,
    curator_id:   body.curator_id,
    curator_name: body.curator_name,
    decision:     kind,
    rationale:    body.rationale,
  };
  let decision = lifecycle::apply_decision(store.as_ref(), input).await?;
  Ok((StatusCode::CREATED, Json(decision)))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /stats`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<StoreStats>, ApiError>
where
  S: CurationStore,
{
  Ok(Json(lifecycle::stats(store.as_ref()).await?))
}
