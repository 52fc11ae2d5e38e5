//! Subcommand implementations. Each returns the text it prints so the
//! formatting can be checked without a terminal.

mod export;
mod ingest;
mod review;
mod serve;

use sieve_store_sqlite::SqliteStore;

use crate::{cli::Command, settings::Settings};

pub async fn run(
  command: Command,
  settings: &Settings,
  store: SqliteStore,
) -> anyhow::Result<()> {
  let output = match command {
    Command::Ingest { path } => {
      let path = path.unwrap_or_else(|| settings.inbox_dir.clone());
      ingest::run(&store, &path).await?
    }
    Command::List { status } => review::list(&store, status).await?,
    Command::Show { id } => review::show(&store, &id).await?,
    Command::Decide { id, decision, curator, name, rationale } => {
      review::decide(&store, id, decision, curator, name, rationale).await?
    }
    Command::Export { format, no_provenance, style, out } => {
      let options = sieve_rdf::ExportOptions {
        format,
        include_provenance: !no_provenance,
        style,
      };
      let out = out.unwrap_or_else(|| settings.export_dir.clone());
      export::run(&store, &out, &options).await?
    }
    Command::Stats => review::stats(&store).await?,
    Command::Serve => return serve::run(settings, store).await,
  };
  print!("{output}");
  Ok(())
}
