//! N-Triples: one fully expanded triple per line, no prefixes.

use super::{escape_iri, escape_literal};
use crate::{
  Graph,
  term::{Term, Triple},
};

pub(super) fn write(graph: &Graph) -> String {
  let mut out = String::new();
  for triple in graph.iter() {
    out.push_str(&line(triple));
    out.push('\n');
  }
  out
}

fn line(triple: &Triple) -> String {
  format!(
    "{} <{}> {} .",
    term(&triple.subject),
    escape_iri(&triple.predicate),
    term(&triple.object)
  )
}

fn term(t: &Term) -> String {
  match t {
    Term::Iri(iri) => format!("<{}>", escape_iri(iri)),
    Term::Blank(node) => format!("_:{}", node.label()),
    Term::Literal(lit) => {
      let mut s = format!("\"{}\"", escape_literal(&lit.lexical));
      if let Some(lang) = &lit.language {
        s.push('@');
        s.push_str(lang);
      } else if let Some(dt) = &lit.datatype {
        s.push_str(&format!("^^<{}>", escape_iri(dt)));
      }
      s
    }
  }
}
