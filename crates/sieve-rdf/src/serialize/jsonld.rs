//! JSON-LD writer.
//!
//! Emits one node object per subject inside `@graph`, keyed by full
//! predicate IRIs so the document expands without consulting the context.
//! The context only carries the graph's prefix bindings. IRIs are escaped
//! like in Turtle.

use serde_json::{Map, Value, json};

use super::escape_iri;
use crate::{
  Graph, Result,
  term::{Term, Triple},
  vocab,
};

pub(super) fn write(graph: &Graph) -> Result<String> {
  let context: Map<String, Value> = graph
    .prefixes()
    .iter()
    .map(|(prefix, ns)| (prefix.clone(), Value::String(escape_iri(ns))))
    .collect();

  let nodes: Vec<Value> = graph
    .by_subject()
    .into_iter()
    .filter_map(|(subject, triples)| node(subject, &triples))
    .collect();

  let doc = json!({ "@context": context, "@graph": nodes });
  let mut text = serde_json::to_string_pretty(&doc)?;
  text.push('\n');
  Ok(text)
}

fn node(subject: &Term, triples: &[&Triple]) -> Option<Value> {
  let mut obj = Map::new();
  obj.insert("@id".to_owned(), Value::String(id(subject)?));

  let rdf_type = vocab::rdf("type");
  for triple in triples {
    if triple.predicate == rdf_type {
      if let Term::Iri(class) = &triple.object {
        push(&mut obj, "@type", Value::String(escape_iri(class)));
        continue;
      }
    }
    push(&mut obj, &escape_iri(&triple.predicate), object(&triple.object));
  }
  Some(Value::Object(obj))
}

fn push(obj: &mut Map<String, Value>, key: &str, value: Value) {
  match obj.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
    Value::Array(values) => values.push(value),
    other => *other = Value::Array(vec![other.take(), value]),
  }
}

fn id(t: &Term) -> Option<String> {
  match t {
    Term::Iri(iri) => Some(escape_iri(iri)),
    Term::Blank(node) => Some(format!("_:{}", node.label())),
    Term::Literal(_) => None,
  }
}

fn object(t: &Term) -> Value {
  match t {
    Term::Literal(lit) => {
      let mut v = Map::new();
      v.insert("@value".to_owned(), Value::String(lit.lexical.clone()));
      if let Some(lang) = &lit.language {
        v.insert("@language".to_owned(), Value::String(lang.clone()));
      } else if let Some(dt) = &lit.datatype {
        v.insert("@type".to_owned(), Value::String(escape_iri(dt)));
      }
      Value::Object(v)
    }
    other => json!({ "@id": id(other) }),
  }
}
