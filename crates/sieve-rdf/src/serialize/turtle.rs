//! Turtle writer. Also used for N3 output.
//!
//! Triples are grouped by subject in order of first appearance. IRIs under a
//! bound namespace are abbreviated when the remainder is a safe local name;
//! everything else is written in full.

use super::{escape_iri, escape_literal};
use crate::{
  Graph,
  term::{Iri, Term},
  vocab,
};

pub(super) fn write(graph: &Graph) -> String {
  let mut out = String::new();
  for (prefix, namespace) in graph.prefixes() {
    out.push_str(&format!("@prefix {prefix}: <{}> .\n", escape_iri(namespace)));
  }

  for (subject, triples) in graph.by_subject() {
    out.push('\n');
    out.push_str(&term(graph, subject));
    for (i, triple) in triples.iter().enumerate() {
      if i > 0 {
        out.push_str(" ;\n   ");
      }
      out.push(' ');
      out.push_str(&predicate(graph, &triple.predicate));
      out.push(' ');
      out.push_str(&term(graph, &triple.object));
    }
    out.push_str(" .\n");
  }
  out
}

fn predicate(graph: &Graph, iri: &Iri) -> String {
  if iri.as_str() == format!("{}type", vocab::RDF) {
    return "a".to_owned();
  }
  name(graph, iri)
}

fn term(graph: &Graph, t: &Term) -> String {
  match t {
    Term::Iri(iri) => name(graph, iri),
    Term::Blank(node) => format!("_:{}", node.label()),
    Term::Literal(lit) => {
      let mut s = format!("\"{}\"", escape_literal(&lit.lexical));
      if let Some(lang) = &lit.language {
        s.push('@');
        s.push_str(lang);
      } else if let Some(dt) = &lit.datatype {
        s.push_str("^^");
        s.push_str(&name(graph, dt));
      }
      s
    }
  }
}

/// `prefix:local` when possible, `<iri>` otherwise.
fn name(graph: &Graph, iri: &Iri) -> String {
  graph
    .prefixes()
    .iter()
    .filter_map(|(prefix, ns)| {
      let local = iri.as_str().strip_prefix(ns.as_str())?;
      is_local_name(local).then(|| (ns.as_str().len(), prefix, local))
    })
    .max_by_key(|(len, _, _)| *len)
    .map(|(_, prefix, local)| format!("{prefix}:{local}"))
    .unwrap_or_else(|| format!("<{}>", escape_iri(iri)))
}

/// A conservative subset of Turtle's `PN_LOCAL`.
fn is_local_name(s: &str) -> bool {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
