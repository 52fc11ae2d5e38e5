//! Projection of accepted records and their latest decision into a [`Graph`].
//!
//! For every record the base assertion triple is emitted. With provenance
//! enabled, the curation decision is attached in one of two shapes:
//!
//! ```text
//! Reification (default)                 OwlAxiom
//!
//! cura:decision/<id>                    _:ax a owl:Axiom ;
//!   a cura:CurationDecision ;             owl:annotatedSource   <s> ;
//!   cura:approvedAssertion _:st ;         owl:annotatedProperty <p> ;
//!   prov:wasAttributedTo <curator> ;      owl:annotatedTarget   <o> ;
//!   prov:generatedAtTime "…"^^xsd:dT ;    oboInOwl:source <curator> ;
//!   prov:wasDerivedFrom <artifact> .      SEPIO:0000124 cura:record/<id> .
//! _:st a rdf:Statement ;
//!   rdf:subject <s> ; rdf:predicate <p> ; rdf:object <o> .
//! ```

use std::str::FromStr;

use chrono::SecondsFormat;
use sieve_core::{decision::CurationDecision, record::CurationRecord};

use crate::{
  Error, Graph,
  term::{Iri, Literal, Term},
  vocab::{self, CURA, OBO_IN_OWL, OWL, PROV, RDF, SEPIO, XSD, cura_node, expand_curie, iri, rdf},
};

// ─── Style ───────────────────────────────────────────────────────────────────

/// How decision provenance is attached to an exported assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvenanceStyle {
  /// A `cura:CurationDecision` node pointing at an `rdf:Statement`.
  #[default]
  Reification,
  /// An OWL 2 axiom annotation, as used by OBO ontologies.
  OwlAxiom,
}

impl ProvenanceStyle {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Reification => "reification",
      Self::OwlAxiom => "owl-axiom",
    }
  }
}

impl FromStr for ProvenanceStyle {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "reification" | "reified" => Ok(Self::Reification),
      "owl-axiom" | "owl_axiom" | "owl" | "axiom" => Ok(Self::OwlAxiom),
      _ => Err(Error::Unsupported { what: "provenance style", value: s.to_owned() }),
    }
  }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Build the export graph for `entries`.
///
/// Each entry is a record together with its most recent decision. The caller
/// is responsible for passing only ACCEPTED records; this function does not
/// look at status.
pub fn project<'a, I>(entries: I, include_provenance: bool, style: ProvenanceStyle) -> Graph
where
  I: IntoIterator<Item = (&'a CurationRecord, Option<&'a CurationDecision>)>,
{
  let mut graph = Graph::new();
  graph.bind("rdf", RDF);
  graph.bind("xsd", XSD);
  match style {
    ProvenanceStyle::Reification => {
      graph.bind("cura", CURA);
      graph.bind("prov", PROV);
    }
    ProvenanceStyle::OwlAxiom => {
      graph.bind("owl", OWL);
      graph.bind("oboInOwl", OBO_IN_OWL);
      graph.bind("SEPIO", SEPIO);
    }
  }

  for (record, decision) in entries {
    let (s, p, o) = base_triple(record);
    graph.insert(s.clone(), p.clone(), o.clone());

    if !include_provenance {
      continue;
    }
    match style {
      ProvenanceStyle::Reification => {
        if let Some(decision) = decision {
          reify(&mut graph, record, decision, (s, p, o));
        }
      }
      ProvenanceStyle::OwlAxiom => annotate_axiom(&mut graph, record, decision, (s, p, o)),
    }
  }

  graph
}

/// The assertion with every identifier run through [`expand_curie`].
pub(crate) fn base_triple(record: &CurationRecord) -> (Iri, Iri, Iri) {
  let (s, p, o) = record.assertion.triple();
  (
    Iri::new(expand_curie(s)),
    Iri::new(expand_curie(p)),
    Iri::new(expand_curie(o)),
  )
}

fn reify(
  graph: &mut Graph,
  record: &CurationRecord,
  decision: &CurationDecision,
  (s, p, o): (Iri, Iri, Iri),
) {
  let node = Term::Iri(cura_node("decision", &record.id));
  let statement = graph.fresh_blank();

  graph.insert(node.clone(), rdf("type"), iri(CURA, "CurationDecision"));
  graph.insert(node.clone(), iri(CURA, "approvedAssertion"), statement.clone());

  graph.insert(statement.clone(), rdf("type"), rdf("Statement"));
  graph.insert(statement.clone(), rdf("subject"), s);
  graph.insert(statement.clone(), rdf("predicate"), Term::Iri(p));
  graph.insert(statement, rdf("object"), o);

  graph.insert(
    node.clone(),
    iri(PROV, "wasAttributedTo"),
    Iri::new(expand_curie(&decision.curator_id)),
  );
  graph.insert(
    node.clone(),
    iri(PROV, "generatedAtTime"),
    Literal::typed(
      decision.decided_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
      iri(XSD, "dateTime"),
    ),
  );
  if let Some(uri) = &record.source_artifact_uri {
    graph.insert(node, iri(PROV, "wasDerivedFrom"), Iri::new(uri.as_str()));
  }
}

fn annotate_axiom(
  graph: &mut Graph,
  record: &CurationRecord,
  decision: Option<&CurationDecision>,
  (s, p, o): (Iri, Iri, Iri),
) {
  let axiom = graph.fresh_blank();
  graph.insert(axiom.clone(), rdf("type"), iri(OWL, "Axiom"));
  graph.insert(axiom.clone(), iri(OWL, "annotatedSource"), s);
  graph.insert(axiom.clone(), iri(OWL, "annotatedProperty"), Term::Iri(p));
  graph.insert(axiom.clone(), iri(OWL, "annotatedTarget"), o);

  if let Some(decision) = decision {
    let curator = decision.curator_id.trim_start_matches("orcid:");
    let curator = if curator.contains("://") {
      curator.to_owned()
    } else {
      format!("{}{curator}", vocab::ORCID)
    };
    graph.insert(axiom.clone(), iri(OBO_IN_OWL, "source"), Iri::new(curator));
  }
  graph.insert(axiom, iri(SEPIO, "0000124"), cura_node("record", &record.id));
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use sieve_core::{
    decision::{CurationStatus, DecisionKind},
    record::Assertion,
  };

  use super::*;
  use crate::term::Triple;

  fn accepted() -> (CurationRecord, CurationDecision) {
    let assertion =
      Assertion::new("MONDO:0004979", "rdfs:subClassOf", "MONDO:0005275").unwrap();
    let mut record = CurationRecord::new("mondo-asthma-001", assertion).unwrap();
    record.status = CurationStatus::Accepted;
    record.source_artifact_uri = Some("file:///inbox/asthma.yaml".into());
    let decision = CurationDecision {
      id:           "d-1".into(),
      record_id:    record.id.clone(),
      curator_id:   "orcid:0000-0001-1111-1111".into(),
      curator_name: None,
      decision:     DecisionKind::Accept,
      rationale:    None,
      decided_at:   Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    };
    (record, decision)
  }

  fn t(s: impl Into<Term>, p: Iri, o: impl Into<Term>) -> Triple {
    Triple { subject: s.into(), predicate: p, object: o.into() }
  }

  fn mondo(n: &str) -> Iri { Iri::new(format!("http://purl.obolibrary.org/obo/MONDO_{n}")) }

  fn sub_class_of() -> Iri { Iri::new("http://www.w3.org/2000/01/rdf-schema#subClassOf") }

  #[test]
  fn reification_links_decision_to_statement() {
    let (record, decision) = accepted();
    let g = project([(&record, Some(&decision))], true, ProvenanceStyle::Reification);

    assert!(g.contains(&t(mondo("0004979"), sub_class_of(), mondo("0005275"))));

    let node = Term::Iri(Iri::new("https://w3id.org/curation-app/decision/mondo-asthma-001"));
    assert!(g.contains(&t(
      node.clone(),
      rdf("type"),
      Iri::new("https://w3id.org/curation-app/CurationDecision")
    )));

    let approved = iri(CURA, "approvedAssertion");
    let statements: Vec<_> = g.objects(&node, &approved).collect();
    assert_eq!(statements.len(), 1);
    let st = statements[0].clone();
    assert!(matches!(st, Term::Blank(_)));
    assert!(g.contains(&t(st.clone(), rdf("subject"), mondo("0004979"))));
    assert!(g.contains(&t(st.clone(), rdf("predicate"), sub_class_of())));
    assert!(g.contains(&t(st, rdf("object"), mondo("0005275"))));

    assert!(g.contains(&t(
      node.clone(),
      iri(PROV, "wasAttributedTo"),
      Iri::new("https://orcid.org/0000-0001-1111-1111")
    )));
    assert!(g.contains(&t(
      node.clone(),
      iri(PROV, "generatedAtTime"),
      Literal::typed("2024-06-01T12:00:00Z", iri(XSD, "dateTime"))
    )));
    assert!(g.contains(&t(
      node,
      iri(PROV, "wasDerivedFrom"),
      Iri::new("file:///inbox/asthma.yaml")
    )));
  }

  #[test]
  fn without_provenance_or_decision_only_base_triple_is_emitted() {
    let (record, decision) = accepted();

    let g = project([(&record, Some(&decision))], false, ProvenanceStyle::Reification);
    assert_eq!(g.len(), 1);

    let g = project([(&record, None)], true, ProvenanceStyle::Reification);
    assert_eq!(g.len(), 1);
  }

  #[test]
  fn owl_axiom_style_keeps_base_triple() {
    let (record, decision) = accepted();
    let g = project([(&record, Some(&decision))], true, ProvenanceStyle::OwlAxiom);

    assert!(g.contains(&t(mondo("0004979"), sub_class_of(), mondo("0005275"))));
    let axioms: Vec<_> = g
      .iter()
      .filter(|tr| tr.predicate == rdf("type") && tr.object == Term::Iri(iri(OWL, "Axiom")))
      .map(|tr| tr.subject.clone())
      .collect();
    assert_eq!(axioms.len(), 1);
    assert!(g.contains(&t(
      axioms[0].clone(),
      iri(OBO_IN_OWL, "source"),
      Iri::new("https://orcid.org/0000-0001-1111-1111")
    )));
    assert!(g.contains(&t(
      axioms[0].clone(),
      iri(SEPIO, "0000124"),
      Iri::new("https://w3id.org/curation-app/record/mondo-asthma-001")
    )));
  }

  #[test]
  fn record_ids_are_minted_into_absolute_iris() {
    let (mut record, decision) = accepted();
    record.id = "inbox batch/7".into();

    let g = project([(&record, Some(&decision))], true, ProvenanceStyle::OwlAxiom);
    let evidence: Vec<_> = g.iter().filter(|tr| tr.predicate == iri(SEPIO, "0000124")).collect();
    assert_eq!(evidence.len(), 1);
    assert_eq!(
      evidence[0].object,
      Term::Iri(Iri::new("https://w3id.org/curation-app/record/inbox%20batch%2F7"))
    );

    let g = project([(&record, Some(&decision))], true, ProvenanceStyle::Reification);
    let node = Term::Iri(Iri::new("https://w3id.org/curation-app/decision/inbox%20batch%2F7"));
    assert!(g.contains(&t(node, rdf("type"), iri(CURA, "CurationDecision"))));
  }

  #[test]
  fn empty_input_gives_empty_graph() {
    let g = project(std::iter::empty(), true, ProvenanceStyle::Reification);
    assert!(g.is_empty());
    assert!(!g.prefixes().is_empty());
  }

  #[test]
  fn styles_parse_case_insensitively() {
    assert_eq!("OWL-Axiom".parse::<ProvenanceStyle>().unwrap(), ProvenanceStyle::OwlAxiom);
    assert!("rdf-star".parse::<ProvenanceStyle>().is_err());
  }
}
