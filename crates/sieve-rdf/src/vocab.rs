//! Namespaces, well-known IRIs and compact-identifier expansion.

use crate::term::Iri;

pub const CURA: &str = "https://w3id.org/curation-app/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const PROV: &str = "http://www.w3.org/ns/prov#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const OBO: &str = "http://purl.obolibrary.org/obo/";
pub const OBO_IN_OWL: &str = "http://www.geneontology.org/formats/oboInOwl#";
pub const SEPIO: &str = "http://purl.obolibrary.org/obo/SEPIO_";
pub const ORCID: &str = "https://orcid.org/";
pub const PUBMED: &str = "https://pubmed.ncbi.nlm.nih.gov/";

/// Prefixes that expand into the OBO PURL space as `<OBO><PREFIX>_<local>`.
const OBO_PREFIXES: [&str; 6] = ["MONDO", "DOID", "HP", "GO", "CHEBI", "ECO"];

/// The fixed expansion table. Prefixes are case-sensitive.
const PREFIXES: [(&str, &str); 9] = [
  ("orcid", ORCID),
  ("PMID", PUBMED),
  ("rdf", RDF),
  ("rdfs", RDFS),
  ("owl", OWL),
  ("skos", SKOS),
  ("xsd", XSD),
  ("prov", PROV),
  ("dcterms", DCTERMS),
];

/// Expand a CURIE such as `MONDO:0005015` to a full IRI string.
///
/// Anything containing `://` is returned unchanged, as is an identifier with
/// no colon or an unknown prefix.
pub fn expand_curie(curie: &str) -> String {
  if curie.contains("://") {
    return curie.to_owned();
  }
  let Some((prefix, local)) = curie.split_once(':') else {
    return curie.to_owned();
  };
  if OBO_PREFIXES.contains(&prefix) {
    return format!("{OBO}{prefix}_{local}");
  }
  match PREFIXES.iter().find(|(p, _)| *p == prefix) {
    Some((_, namespace)) => format!("{namespace}{local}"),
    None => curie.to_owned(),
  }
}

pub(crate) fn iri(namespace: &str, local: &str) -> Iri { Iri::new(format!("{namespace}{local}")) }

pub(crate) fn rdf(local: &str) -> Iri { iri(RDF, local) }

/// A node under the curation namespace, `cura:<kind>/<id>`, with `id`
/// percent-encoded as a single path segment.
pub(crate) fn cura_node(kind: &str, id: &str) -> Iri {
  let mut local = format!("{kind}/");
  for byte in id.bytes() {
    if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
      local.push(byte as char);
    } else {
      local.push_str(&format!("%{byte:02X}"));
    }
  }
  iri(CURA, &local)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn obo_prefixes_expand_to_purls() {
    assert_eq!(
      expand_curie("MONDO:0005015"),
      "http://purl.obolibrary.org/obo/MONDO_0005015"
    );
    assert_eq!(expand_curie("ECO:0000305"), "http://purl.obolibrary.org/obo/ECO_0000305");
  }

  #[test]
  fn vocabulary_and_people_prefixes_expand() {
    assert_eq!(
      expand_curie("rdfs:subClassOf"),
      "http://www.w3.org/2000/01/rdf-schema#subClassOf"
    );
    assert_eq!(
      expand_curie("orcid:0000-0001-1111-1111"),
      "https://orcid.org/0000-0001-1111-1111"
    );
    assert_eq!(expand_curie("PMID:12345"), "https://pubmed.ncbi.nlm.nih.gov/12345");
  }

  #[test]
  fn full_uris_and_unknown_prefixes_pass_through() {
    let uri = "http://purl.obolibrary.org/obo/MONDO_0005015";
    assert_eq!(expand_curie(uri), uri);
    assert_eq!(expand_curie("FOO:123"), "FOO:123");
    assert_eq!(expand_curie("mondo:0005015"), "mondo:0005015");
    assert_eq!(expand_curie("plain"), "plain");
  }

  #[test]
  fn curation_nodes_encode_the_id_as_one_segment() {
    assert_eq!(
      cura_node("record", "mondo-asthma-001").as_str(),
      "https://w3id.org/curation-app/record/mondo-asthma-001"
    );
    assert_eq!(
      cura_node("decision", "batch 7/β").as_str(),
      "https://w3id.org/curation-app/decision/batch%207%2F%CE%B2"
    );
  }
}
