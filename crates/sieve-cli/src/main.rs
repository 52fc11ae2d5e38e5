//! `sieve` — operator entry point for the curation store.
//!
//! # Usage
//!
//! ```text
//! sieve ingest                       # scan the configured inbox
//! sieve list --status pending
//! sieve decide mondo-asthma-001 accept --curator orcid:0000-0001-2345-6789
//! sieve export --format turtle
//! sieve serve
//! ```
//!
//! Settings come from `sieve.toml` (or `--config`) and `SIEVE_*` environment
//! variables; see [`settings::Settings`].

mod cli;
mod commands;
mod settings;

use anyhow::Context as _;
use clap::Parser;
use sieve_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  if let Some(parent) = settings.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;

  commands::run(cli.command, &settings, store).await
}
