//! RDF terms and triples.

use std::fmt;

// ─── Iri ─────────────────────────────────────────────────────────────────────

/// An IRI, held exactly as produced by CURIE expansion. Writers escape
/// characters that may not appear in an IRI reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
  pub fn new(iri: impl Into<String>) -> Self { Self(iri.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Iri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── BlankNode ───────────────────────────────────────────────────────────────

/// A blank node label, unique within one [`crate::Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(String);

impl BlankNode {
  pub(crate) fn new(label: impl Into<String>) -> Self { Self(label.into()) }

  pub fn label(&self) -> &str { &self.0 }
}

// ─── Literal ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
  pub lexical:  String,
  pub datatype: Option<Iri>,
  pub language: Option<String>,
}

impl Literal {
  pub fn plain(lexical: impl Into<String>) -> Self {
    Self { lexical: lexical.into(), datatype: None, language: None }
  }

  pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
    Self { lexical: lexical.into(), datatype: Some(datatype), language: None }
  }
}

// ─── Term / Triple ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
  Iri(Iri),
  Blank(BlankNode),
  Literal(Literal),
}

impl From<Iri> for Term {
  fn from(iri: Iri) -> Self { Self::Iri(iri) }
}

impl From<BlankNode> for Term {
  fn from(node: BlankNode) -> Self { Self::Blank(node) }
}

impl From<Literal> for Term {
  fn from(literal: Literal) -> Self { Self::Literal(literal) }
}

/// Subjects are IRIs or blank nodes; [`crate::Graph::insert`] enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
  pub subject:   Term,
  pub predicate: Iri,
  pub object:    Term,
}
