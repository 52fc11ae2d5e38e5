//! Runtime settings: built-in defaults, then the optional TOML file, then
//! `SIEVE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  pub store_path: PathBuf,
  pub inbox_dir:  PathBuf,
  pub export_dir: PathBuf,
  pub host:       String,
  pub port:       u16,
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings: Settings = config::Config::builder()
      .set_default("store_path", "data/curation.sqlite3")?
      .set_default("inbox_dir", "data/inbox")?
      .set_default("export_dir", "data/exports")?
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8710_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SIEVE"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")?;

    Ok(Self {
      store_path: expand_tilde(&settings.store_path),
      inbox_dir: expand_tilde(&settings.inbox_dir),
      export_dir: expand_tilde(&settings.export_dir),
      ..settings
    })
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
