//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request was well-formed but failed domain validation.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

impl From<sieve_core::Error> for ApiError {
  fn from(e: sieve_core::Error) -> Self {
    use sieve_core::Error;
    match e {
      Error::Validation(m) => ApiError::Unprocessable(m),
      Error::RecordNotFound(id) => ApiError::NotFound(format!("record {id} not found")),
      Error::Store(inner) => ApiError::Internal(inner),
    }
  }
}

impl From<sieve_ingest::Error> for ApiError {
  fn from(e: sieve_ingest::Error) -> Self {
    use sieve_ingest::Error;
    match e {
      Error::Parse(_) | Error::Yaml(_) => ApiError::BadRequest(e.to_string()),
      Error::Core(core) => core.into(),
      Error::Io(_) | Error::Store(_) => ApiError::Internal(Box::new(e)),
    }
  }
}

impl From<sieve_rdf::Error> for ApiError {
  fn from(e: sieve_rdf::Error) -> Self {
    use sieve_rdf::Error;
    match e {
      Error::Core(core) => core.into(),
      Error::Unsupported { .. } => ApiError::BadRequest(e.to_string()),
      Error::UnrepresentablePredicate(_) => ApiError::Unprocessable(e.to_string()),
      Error::Io(_) | Error::Json(_) | Error::Xml(_) => ApiError::Internal(Box::new(e)),
    }
  }
}
