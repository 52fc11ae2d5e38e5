//! Store-facing export: read ACCEPTED records and their latest decision,
//! project, serialise, and optionally write a timestamped file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sieve_core::{
  decision::{CurationDecision, CurationStatus},
  lifecycle,
  record::CurationRecord,
  store::CurationStore,
};

use crate::{
  Graph, Result,
  project::{ProvenanceStyle, base_triple, project},
  serialize::{Format, serialize},
  vocab::RDF,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
  pub format:             Format,
  pub include_provenance: bool,
  pub style:              ProvenanceStyle,
}

impl Default for ExportOptions {
  fn default() -> Self {
    Self {
      format:             Format::default(),
      include_provenance: true,
      style:              ProvenanceStyle::default(),
    }
  }
}

/// Build the export graph from the store without serialising it.
pub async fn build_graph<S>(store: &S, options: &ExportOptions) -> Result<(Graph, usize)>
where
  S: CurationStore,
{
  let records = lifecycle::records_by_status(store, CurationStatus::Accepted).await?;

  let mut entries: Vec<(CurationRecord, Option<CurationDecision>)> =
    Vec::with_capacity(records.len());
  for record in records {
    let decision = if options.include_provenance {
      lifecycle::current_decision(store, &record.id).await?
    } else {
      None
    };
    entries.push((record, decision));
  }

  let graph = project(
    entries.iter().map(|(r, d)| (r, d.as_ref())),
    options.include_provenance,
    options.style,
  );
  Ok((graph, entries.len()))
}

/// Serialise the export graph to a string.
pub async fn render<S>(store: &S, options: &ExportOptions) -> Result<String>
where
  S: CurationStore,
{
  let (graph, _) = build_graph(store, options).await?;
  serialize(&graph, options.format)
}

/// Write `export_<YYYYMMDD_HHMMSS>.<ext>` under `destination` (created if
/// missing) and return its path. The timestamp is UTC. An existing file
/// with the same name is overwritten.
pub async fn export<S>(
  store: &S,
  destination: impl AsRef<Path>,
  options: &ExportOptions,
) -> Result<PathBuf>
where
  S: CurationStore,
{
  let (graph, records) = build_graph(store, options).await?;
  let body = serialize(&graph, options.format)?;

  let destination = destination.as_ref();
  tokio::fs::create_dir_all(destination).await?;
  let stamp = Utc::now().format("%Y%m%d_%H%M%S");
  let path = destination.join(format!("export_{stamp}.{}", options.format.extension()));
  tokio::fs::write(&path, body).await?;

  tracing::info!(
    path = %path.display(),
    records,
    triples = graph.len(),
    format = %options.format,
    "export written"
  );
  Ok(path)
}

/// A single record's assertion as a Turtle document, regardless of status.
pub fn record_turtle(record: &CurationRecord) -> Result<String> {
  let mut graph = Graph::new();
  graph.bind("rdf", RDF);
  let (s, p, o) = base_triple(record);
  graph.insert(s, p, o);
  serialize(&graph, Format::Turtle)
}
