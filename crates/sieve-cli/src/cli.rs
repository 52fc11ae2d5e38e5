//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sieve_core::decision::{CurationStatus, DecisionKind};
use sieve_rdf::{Format, ProvenanceStyle};

#[derive(Parser, Debug)]
#[command(
  name = "sieve",
  version,
  about = "Review ontology assertions and export the accepted ones as RDF"
)]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "sieve.toml")]
  pub config: PathBuf,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Ingest YAML record descriptions from a file or directory.
  Ingest {
    /// File or directory to read. Defaults to the configured inbox.
    path: Option<PathBuf>,
  },

  /// List records, newest first.
  List {
    /// Only show records with this status.
    #[arg(long)]
    status: Option<CurationStatus>,
  },

  /// Show one record, its decision history and its Turtle form.
  Show { id: String },

  /// Record a curation decision.
  Decide {
    id:        String,
    /// accept, reject or defer.
    decision:  DecisionKind,
    /// Curator identifier, e.g. orcid:0000-0001-2345-6789.
    #[arg(long)]
    curator:   String,
    /// Curator display name.
    #[arg(long)]
    name:      Option<String>,
    /// Required for reject.
    #[arg(long)]
    rationale: Option<String>,
  },

  /// Export accepted records as RDF.
  Export {
    /// turtle, xml, json-ld, n3 or nt.
    #[arg(long, default_value = "turtle")]
    format:        Format,
    /// Emit only the bare assertion triples.
    #[arg(long)]
    no_provenance: bool,
    /// reification or owl-axiom.
    #[arg(long, default_value = "reification")]
    style:         ProvenanceStyle,
    /// Output directory. Defaults to the configured export directory.
    #[arg(long)]
    out:           Option<PathBuf>,
  },

  /// Print record counts per status.
  Stats,

  /// Serve the JSON API under `/api`.
  Serve,
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn arguments_are_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn decide_parses_case_insensitive_kind() {
    let cli = Cli::try_parse_from([
      "sieve", "decide", "rec-1", "reject", "--curator", "orcid:x", "--rationale", "dup",
    ])
    .unwrap();
    match cli.command {
      Command::Decide { id, decision, rationale, .. } => {
        assert_eq!(id, "rec-1");
        assert_eq!(decision, DecisionKind::Reject);
        assert_eq!(rationale.as_deref(), Some("dup"));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn export_defaults() {
    let cli = Cli::try_parse_from(["sieve", "export"]).unwrap();
    match cli.command {
      Command::Export { format, no_provenance, style, out } => {
        assert_eq!(format, Format::Turtle);
        assert!(!no_provenance);
        assert_eq!(style, ProvenanceStyle::Reification);
        assert!(out.is_none());
      }
      other => panic!("unexpected command {other:?}"),
    }
    assert!(Cli::try_parse_from(["sieve", "export", "--format", "csv"]).is_err());
  }
}
