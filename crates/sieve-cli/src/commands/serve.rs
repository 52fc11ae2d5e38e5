use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use sieve_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::settings::Settings;

/// Serve the JSON API under `/api` until the process is stopped.
pub async fn run(settings: &Settings, store: SqliteStore) -> anyhow::Result<()> {
  let app = Router::new()
    .nest("/api", sieve_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());

  let address = settings.address();
  tracing::info!("Listening on http://{address}/api");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      tokio::signal::ctrl_c().await.ok();
      tracing::info!("shutting down");
    })
    .await
    .context("server error")?;
  Ok(())
}
