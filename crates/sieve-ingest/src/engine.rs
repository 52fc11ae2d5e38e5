//! Idempotent insertion of parsed records, one description, a batch, a file
//! or a whole inbox directory at a time.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use sieve_core::{lifecycle, record::CurationRecord, store::CurationStore};
use walkdir::WalkDir;

use crate::{
  BatchOutcome, DirectoryOutcome, Error, ItemError, Outcome, Result,
  parse::{documents, parse},
};

// ─── Single records ──────────────────────────────────────────────────────────

/// Insert `record` unless its id is already taken.
///
/// An existing record is never overwritten, even when the new content
/// differs. A concurrent ingest of the same id that wins the insert also
/// turns this one into [`Outcome::Skipped`].
pub async fn ingest_record<S>(store: &S, record: CurationRecord) -> Result<Outcome>
where
  S: CurationStore,
{
  let id = record.id.clone();
  if store.record_exists(&id).await.map_err(Error::store)? {
    return Ok(skipped(&id));
  }

  match lifecycle::create_record(store, record).await {
    Ok(()) => Ok(Outcome::Inserted),
    // The insert lost to another writer between the check and the write.
    Err(sieve_core::Error::Store(e)) => {
      if store.record_exists(&id).await.map_err(Error::store)? {
        Ok(skipped(&id))
      } else {
        Err(sieve_core::Error::Store(e).into())
      }
    }
    Err(e) => Err(e.into()),
  }
}

fn skipped(id: &str) -> Outcome {
  tracing::warn!(record_id = %id, "record id already ingested; skipping new content");
  Outcome::Skipped
}

/// Parse one description and insert it.
pub async fn ingest_one<S>(store: &S, description: Value) -> Result<Outcome>
where
  S: CurationStore,
{
  ingest_record(store, parse(description)?).await
}

// ─── Batches ─────────────────────────────────────────────────────────────────

/// Ingest every description, collecting failures instead of stopping at the
/// first one. Failing items are labelled by their zero-based index.
pub async fn ingest_batch<S, I>(store: &S, descriptions: I) -> BatchOutcome
where
  S: CurationStore,
  I: IntoIterator<Item = Value>,
{
  ingest_labelled(store, descriptions, "item", None).await
}

/// Split `text` into descriptions and ingest them as a batch.
///
/// Malformed YAML fails the whole call since no item boundary can be
/// trusted; per-item failures land in the outcome.
pub async fn ingest_str<S>(store: &S, text: &str, source: &str) -> Result<BatchOutcome>
where
  S: CurationStore,
{
  let docs = documents(text)?;
  Ok(ingest_labelled(store, docs, source, None).await)
}

/// Read and ingest one YAML file.
///
/// Records that do not name a `source_artifact_uri` get the file's
/// `file://` URI.
pub async fn ingest_file<S>(store: &S, path: impl AsRef<Path>) -> Result<BatchOutcome>
where
  S: CurationStore,
{
  let path = path.as_ref();
  let text = tokio::fs::read_to_string(path).await?;
  let docs = documents(&text)?;
  let uri = file_uri(path)?;
  let label = path.display().to_string();

  let outcome = ingest_labelled(store, docs, &label, Some(&uri)).await;
  tracing::debug!(
    path = %label,
    inserted = outcome.inserted,
    skipped = outcome.skipped,
    errors = outcome.errors.len(),
    "file ingested"
  );
  Ok(outcome)
}

async fn ingest_labelled<S, I>(
  store: &S,
  descriptions: I,
  label: &str,
  artifact_uri: Option<&str>,
) -> BatchOutcome
where
  S: CurationStore,
  I: IntoIterator<Item = Value>,
{
  let mut outcome = BatchOutcome::default();

  for (index, description) in descriptions.into_iter().enumerate() {
    let result = match parse(description) {
      Ok(mut record) => {
        if record.source_artifact_uri.is_none() {
          record.source_artifact_uri = artifact_uri.map(str::to_owned);
        }
        ingest_record(store, record).await
      }
      Err(e) => Err(e),
    };

    match result {
      Ok(Outcome::Inserted) => outcome.inserted += 1,
      Ok(Outcome::Skipped) => outcome.skipped += 1,
      Err(e) => {
        let item = format!("{label} #{index}");
        tracing::warn!(%item, error = %e, "description not ingested");
        outcome.errors.push(ItemError { item, error: e.to_string() });
      }
    }
  }

  outcome
}

// ─── Directories ─────────────────────────────────────────────────────────────

/// Ingest every `.yaml` / `.yml` file below `dir`, recursively and in file
/// name order. The directory is created when missing. A file that cannot be
/// read or parsed is recorded in `errors` and the scan carries on.
pub async fn ingest_directory<S>(
  store: &S,
  dir: impl AsRef<Path>,
) -> Result<DirectoryOutcome>
where
  S: CurationStore,
{
  let dir = dir.as_ref();
  let mut outcome = DirectoryOutcome::default();

  if !tokio::fs::try_exists(dir).await? {
    tokio::fs::create_dir_all(dir).await?;
    tracing::info!(path = %dir.display(), "created inbox directory");
    return Ok(outcome);
  }

  for path in yaml_files(dir, &mut outcome.errors) {
    outcome.files += 1;
    match ingest_file(store, &path).await {
      Ok(batch) => outcome.absorb(batch),
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "file not ingested");
        outcome.errors.push(ItemError {
          item:  path.display().to_string(),
          error: e.to_string(),
        });
      }
    }
  }

  tracing::info!(
    path = %dir.display(),
    files = outcome.files,
    inserted = outcome.inserted,
    skipped = outcome.skipped,
    errors = outcome.errors.len(),
    "directory ingested"
  );
  Ok(outcome)
}

fn yaml_files(dir: &Path, errors: &mut Vec<ItemError>) -> Vec<PathBuf> {
  let mut files = Vec::new();
  for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
    match entry {
      Ok(entry) if entry.file_type().is_file() && is_yaml(entry.path()) => {
        files.push(entry.into_path());
      }
      Ok(_) => {}
      Err(e) => {
        let item = e
          .path()
          .map_or_else(|| dir.display().to_string(), |p| p.display().to_string());
        errors.push(ItemError { item, error: e.to_string() });
      }
    }
  }
  files
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

fn file_uri(path: &Path) -> Result<String> {
  let absolute = std::path::absolute(path)?;
  Ok(format!("file://{}", absolute.display()))
}
