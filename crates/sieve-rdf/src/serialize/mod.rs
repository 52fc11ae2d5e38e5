//! Graph writers.
//!
//! All writers are hand-rolled over the small [`Graph`] model: the export
//! graph only ever holds IRIs, blank nodes and simple literals, so there is
//! no need for a general-purpose RDF toolkit.

mod jsonld;
mod ntriples;
mod rdfxml;
mod turtle;

use std::{fmt, str::FromStr};

use crate::{Error, Graph, Result, term::Iri};

// ─── Format ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
  #[default]
  Turtle,
  RdfXml,
  JsonLd,
  /// Written as Turtle, which is a subset of N3.
  N3,
  NTriples,
}

impl Format {
  pub const ALL: [Self; 5] =
    [Self::Turtle, Self::RdfXml, Self::JsonLd, Self::N3, Self::NTriples];

  /// File extension used for export files.
  pub fn extension(self) -> &'static str {
    match self {
      Self::Turtle => "ttl",
      Self::RdfXml => "rdf",
      Self::JsonLd => "jsonld",
      Self::N3 => "n3",
      Self::NTriples => "nt",
    }
  }

  pub fn media_type(self) -> &'static str {
    match self {
      Self::Turtle => "text/turtle",
      Self::RdfXml => "application/rdf+xml",
      Self::JsonLd => "application/ld+json",
      Self::N3 => "text/n3",
      Self::NTriples => "application/n-triples",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Turtle => "turtle",
      Self::RdfXml => "xml",
      Self::JsonLd => "json-ld",
      Self::N3 => "n3",
      Self::NTriples => "nt",
    }
  }
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Format {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "turtle" | "ttl" => Ok(Self::Turtle),
      "xml" | "rdf" | "rdfxml" | "rdf/xml" | "rdf-xml" => Ok(Self::RdfXml),
      "json-ld" | "jsonld" => Ok(Self::JsonLd),
      "n3" => Ok(Self::N3),
      "nt" | "ntriples" | "n-triples" => Ok(Self::NTriples),
      _ => Err(Error::Unsupported { what: "export format", value: s.to_owned() }),
    }
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Serialise `graph` in `format`.
pub fn serialize(graph: &Graph, format: Format) -> Result<String> {
  match format {
    Format::Turtle | Format::N3 => Ok(turtle::write(graph)),
    Format::NTriples => Ok(ntriples::write(graph)),
    Format::RdfXml => rdfxml::write(graph),
    Format::JsonLd => jsonld::write(graph),
  }
}

// ─── Shared escaping ─────────────────────────────────────────────────────────

/// Percent-encode the characters that may not appear inside `<…>` in
/// Turtle / N-Triples (controls, space, `<>"{}|^` and backtick, backslash).
pub(crate) fn escape_iri(iri: &Iri) -> String {
  let mut out = String::with_capacity(iri.as_str().len());
  for c in iri.as_str().chars() {
    if c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') {
      let mut buf = [0u8; 4];
      for b in c.encode_utf8(&mut buf).bytes() {
        out.push_str(&format!("%{b:02X}"));
      }
    } else {
      out.push(c);
    }
  }
  out
}

/// Escape a string for a double-quoted Turtle / N-Triples literal.
pub(crate) fn escape_literal(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out
}
