//! RDF/XML writer built on `quick-xml`.
//!
//! One `rdf:Description` per subject. Every predicate must split into a
//! namespace and an XML local name; namespaces without a bound prefix get
//! generated `ns1`, `ns2`, … declarations on the root element. IRIs are
//! escaped like in Turtle before they land in attributes.

use std::io::Cursor;

use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::escape_iri;
use crate::{
  Error, Graph, Result,
  term::{Iri, Term},
  vocab,
};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

pub(super) fn write(graph: &Graph) -> Result<String> {
  let namespaces = Namespaces::collect(graph)?;

  let mut w = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
  emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

  let mut root = BytesStart::new("rdf:RDF");
  for (prefix, ns) in &namespaces.bound {
    root.push_attribute((format!("xmlns:{prefix}").as_str(), ns.as_str()));
  }
  emit(&mut w, Event::Start(root))?;

  for (subject, triples) in graph.by_subject() {
    let mut desc = BytesStart::new("rdf:Description");
    match subject {
      Term::Iri(iri) => desc.push_attribute(("rdf:about", escape_iri(iri).as_str())),
      Term::Blank(node) => desc.push_attribute(("rdf:nodeID", node.label())),
      Term::Literal(_) => continue,
    }
    emit(&mut w, Event::Start(desc))?;

    for triple in triples {
      let qname = namespaces.qname(&triple.predicate)?;
      let mut el = BytesStart::new(qname.as_str());
      match &triple.object {
        Term::Iri(iri) => {
          el.push_attribute(("rdf:resource", escape_iri(iri).as_str()));
          emit(&mut w, Event::Empty(el))?;
        }
        Term::Blank(node) => {
          el.push_attribute(("rdf:nodeID", node.label()));
          emit(&mut w, Event::Empty(el))?;
        }
        Term::Literal(lit) => {
          if let Some(lang) = &lit.language {
            el.push_attribute(("xml:lang", lang.as_str()));
          } else if let Some(dt) = &lit.datatype {
            el.push_attribute(("rdf:datatype", escape_iri(dt).as_str()));
          }
          emit(&mut w, Event::Start(el))?;
          emit(&mut w, Event::Text(BytesText::new(&lit.lexical)))?;
          emit(&mut w, Event::End(BytesEnd::new(qname.as_str())))?;
        }
      }
    }

    emit(&mut w, Event::End(BytesEnd::new("rdf:Description")))?;
  }

  emit(&mut w, Event::End(BytesEnd::new("rdf:RDF")))?;

  let mut bytes = w.into_inner().into_inner();
  bytes.push(b'\n');
  String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
}

fn emit(w: &mut XmlWriter, event: Event<'_>) -> Result<()> {
  w.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}

// ─── Namespaces ──────────────────────────────────────────────────────────────

struct Namespaces {
  /// `rdf` first, then graph bindings in order, then generated prefixes.
  /// Namespaces are held escaped.
  bound: Vec<(String, String)>,
}

impl Namespaces {
  fn collect(graph: &Graph) -> Result<Self> {
    let mut bound = vec![("rdf".to_owned(), vocab::RDF.to_owned())];
    for (prefix, ns) in graph.prefixes() {
      if !bound.iter().any(|(p, _)| p == prefix) {
        bound.push((prefix.clone(), escape_iri(ns)));
      }
    }

    let mut generated = 0;
    for triple in graph.iter() {
      let predicate = escape_iri(&triple.predicate);
      let (ns, _) = split_predicate(&predicate)?;
      if !bound.iter().any(|(_, n)| n == ns) {
        generated += 1;
        bound.push((format!("ns{generated}"), ns.to_owned()));
      }
    }
    Ok(Self { bound })
  }

  fn qname(&self, predicate: &Iri) -> Result<String> {
    let escaped = escape_iri(predicate);
    let (ns, local) = split_predicate(&escaped)?;
    let prefix = self
      .bound
      .iter()
      .find(|(_, n)| n == ns)
      .map(|(p, _)| p.as_str())
      .ok_or_else(|| Error::UnrepresentablePredicate(predicate.to_string()))?;
    Ok(format!("{prefix}:{local}"))
  }
}

/// Split at the longest suffix that is a valid XML NCName.
fn split_predicate(s: &str) -> Result<(&str, &str)> {
  let tail_start = s
    .char_indices()
    .rev()
    .take_while(|(_, c)| is_name_char(*c))
    .last()
    .map_or(s.len(), |(i, _)| i);
  let local_start = s[tail_start..]
    .char_indices()
    .find(|(_, c)| is_name_start(*c))
    .map(|(i, _)| tail_start + i);

  match local_start {
    Some(i) if i > 0 => Ok((&s[..i], &s[i..])),
    _ => Err(Error::UnrepresentablePredicate(s.to_owned())),
  }
}

fn is_name_start(c: char) -> bool { c.is_ascii_alphabetic() || c == '_' }

fn is_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::term::Literal;

  #[test]
  fn predicates_split_at_ncname_boundary() {
    let split = |s: &str| {
      split_predicate(s).map(|(a, b)| (a.to_owned(), b.to_owned()))
    };
    assert_eq!(
      split("http://www.w3.org/2000/01/rdf-schema#subClassOf").unwrap(),
      ("http://www.w3.org/2000/01/rdf-schema#".to_owned(), "subClassOf".to_owned())
    );
    assert_eq!(
      split("http://purl.obolibrary.org/obo/SEPIO_0000124").unwrap(),
      ("http://purl.obolibrary.org/obo/".to_owned(), "SEPIO_0000124".to_owned())
    );
    assert!(matches!(split("BFO:0000050"), Err(Error::UnrepresentablePredicate(_))));
  }

  #[test]
  fn writes_descriptions_with_generated_prefixes() {
    let mut g = Graph::new();
    let s = Iri::new("http://example.org/a&b");
    g.insert(s.clone(), Iri::new("http://example.org/terms/rel"), Iri::new("http://example.org/c"));
    g.insert(s, Iri::new("http://example.org/terms/note"), Literal::plain("x < y"));

    let xml = write(&g).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains("xmlns:ns1=\"http://example.org/terms/\""));
    assert!(xml.contains("rdf:about=\"http://example.org/a&amp;b\""));
    assert!(xml.contains("<ns1:rel rdf:resource=\"http://example.org/c\"/>"));
    assert!(xml.contains("<ns1:note>x &lt; y</ns1:note>"));
    assert!(xml.trim_end().ends_with("</rdf:RDF>"));
  }

  #[test]
  fn unsplittable_predicate_fails() {
    let mut g = Graph::new();
    g.insert(Iri::new("FOO:1"), Iri::new("BFO:0000050"), Iri::new("FOO:2"));
    assert!(matches!(write(&g), Err(Error::UnrepresentablePredicate(_))));
  }

  #[test]
  fn iris_in_attributes_are_escaped() {
    let mut g = Graph::new();
    let s = Iri::new("FOO:1 x");
    g.insert(s.clone(), Iri::new("http://example.org/terms/rel"), Iri::new("BAR:<2>"));
    g.insert(
      s,
      Iri::new("http://example.org/terms/note"),
      Literal::typed("v", Iri::new("http://example.org/dt x")),
    );

    let xml = write(&g).unwrap();
    assert!(xml.contains("rdf:about=\"FOO:1%20x\""));
    assert!(xml.contains("rdf:resource=\"BAR:%3C2%3E\""));
    assert!(xml.contains("rdf:datatype=\"http://example.org/dt%20x\""));
    assert!(!xml.contains("FOO:1 x"));
  }
}
