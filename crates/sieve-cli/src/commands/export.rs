use std::path::Path;

use anyhow::Context as _;
use sieve_core::store::CurationStore;
use sieve_rdf::ExportOptions;

pub async fn run<S>(store: &S, out: &Path, options: &ExportOptions) -> anyhow::Result<String>
where
  S: CurationStore,
{
  let path = sieve_rdf::export(store, out, options)
    .await
    .with_context(|| format!("failed to export to {}", out.display()))?;
  Ok(format!("{}\n", path.display()))
}
