//! An insertion-ordered, duplicate-free set of triples with prefix bindings.

use std::collections::HashSet;

use crate::term::{BlankNode, Iri, Term, Triple};

#[derive(Debug, Clone, Default)]
pub struct Graph {
  prefixes:   Vec<(String, Iri)>,
  triples:    Vec<Triple>,
  seen:       HashSet<Triple>,
  next_blank: usize,
}

impl Graph {
  pub fn new() -> Self { Self::default() }

  /// Bind `prefix` to `namespace` for writers that abbreviate IRIs. Rebinding
  /// a prefix replaces its namespace.
  pub fn bind(&mut self, prefix: &str, namespace: &str) {
    let namespace = Iri::new(namespace);
    match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
      Some((_, ns)) => *ns = namespace,
      None => self.prefixes.push((prefix.to_owned(), namespace)),
    }
  }

  pub fn prefixes(&self) -> &[(String, Iri)] { &self.prefixes }

  /// A blank node not used anywhere else in this graph.
  pub fn fresh_blank(&mut self) -> BlankNode {
    let node = BlankNode::new(format!("b{}", self.next_blank));
    self.next_blank += 1;
    node
  }

  /// Add a triple. Returns `false` if it was already present or if the
  /// subject is a literal, in which case nothing is added.
  pub fn insert(
    &mut self,
    subject: impl Into<Term>,
    predicate: Iri,
    object: impl Into<Term>,
  ) -> bool {
    let subject = subject.into();
    if matches!(subject, Term::Literal(_)) {
      tracing::warn!(?subject, "literal subject dropped");
      return false;
    }
    let triple = Triple { subject, predicate, object: object.into() };
    if !self.seen.insert(triple.clone()) {
      return false;
    }
    self.triples.push(triple);
    true
  }

  pub fn contains(&self, triple: &Triple) -> bool { self.seen.contains(triple) }

  pub fn len(&self) -> usize { self.triples.len() }

  pub fn is_empty(&self) -> bool { self.triples.is_empty() }

  /// Triples in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &Triple> + '_ { self.triples.iter() }

  /// Distinct subjects in order of first appearance, each with its triples.
  pub fn by_subject(&self) -> Vec<(&Term, Vec<&Triple>)> {
    let mut groups: Vec<(&Term, Vec<&Triple>)> = Vec::new();
    for triple in &self.triples {
      match groups.iter_mut().find(|(s, _)| *s == &triple.subject) {
        Some((_, ts)) => ts.push(triple),
        None => groups.push((&triple.subject, vec![triple])),
      }
    }
    groups
  }

  /// Objects of every `(subject, predicate, ?)` triple.
  pub fn objects<'a>(
    &'a self,
    subject: &Term,
    predicate: &Iri,
  ) -> impl Iterator<Item = &'a Term> + use<'a> {
    let (subject, predicate) = (subject.clone(), predicate.clone());
    self
      .triples
      .iter()
      .filter(move |t| t.subject == subject && t.predicate == predicate)
      .map(|t| &t.object)
  }
}
