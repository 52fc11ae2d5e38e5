use std::{fmt::Write as _, path::Path};

use anyhow::Context as _;
use sieve_core::store::CurationStore;
use sieve_ingest::{DirectoryOutcome, ItemError};

/// Ingest a single file, or every YAML file under a directory.
pub async fn run<S>(store: &S, path: &Path) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let outcome = if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file()) {
    let batch = sieve_ingest::ingest_file(store, path)
      .await
      .with_context(|| format!("failed to ingest {}", path.display()))?;
    DirectoryOutcome {
      files:    1,
      inserted: batch.inserted,
      skipped:  batch.skipped,
      errors:   batch.errors,
    }
  } else {
    sieve_ingest::ingest_directory(store, path)
      .await
      .with_context(|| format!("failed to scan {}", path.display()))?
  };
  Ok(summary(&outcome))
}

fn summary(outcome: &DirectoryOutcome) -> String {
  let mut out = format!(
    "{} file(s): {} inserted, {} skipped, {} failed\n",
    outcome.files,
    outcome.inserted,
    outcome.skipped,
    outcome.errors.len()
  );
  for ItemError { item, error } in &outcome.errors {
    let _ = writeln!(out, "  {item}: {error}");
  }
  out
}
