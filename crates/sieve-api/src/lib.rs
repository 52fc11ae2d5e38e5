//! JSON REST API for Sieve.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sieve_core::store::CurationStore`], for a review front-end to list
//! records, read their history, submit decisions, push new descriptions and
//! pull an RDF export. Auth and TLS are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sieve_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod export;
pub mod ingest;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use sieve_core::store::CurationStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CurationStore + 'static,
{
  Router::new()
    // Records
    .route("/records", get(records::list::<S>))
    .route("/records/{id}", get(records::get_one::<S>))
    .route(
      "/records/{id}/decisions",
      get(records::history::<S>).post(records::decide::<S>),
    )
    .route("/stats", get(records::stats::<S>))
    // Ingest / export
    .route("/ingest", post(ingest::handler::<S>))
    .route("/export", get(export::handler::<S>))
    .with_state(store)
}
