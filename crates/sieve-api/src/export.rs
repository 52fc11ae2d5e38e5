//! `GET /export?format=<fmt>&include_provenance=<bool>&style=<style>`
//!
//! Renders the ACCEPTED records in the requested RDF syntax and returns the
//! document with the matching `Content-Type`. Nothing is written to disk.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use serde::Deserialize;
use sieve_core::store::CurationStore;
use sieve_rdf::{ExportOptions, Format, ProvenanceStyle};

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
  pub format:             Option<String>,
  pub include_provenance: Option<bool>,
  pub style:              Option<String>,
}

impl ExportParams {
  fn options(&self) -> Result<ExportOptions, sieve_rdf::Error> {
    let defaults = ExportOptions::default();
    Ok(ExportOptions {
      format:             match &self.format {
        Some(f) => f.parse::<Format>()?,
        None => defaults.format,
      },
      include_provenance: self.include_provenance.unwrap_or(defaults.include_provenance),
      style:              match &self.style {
        Some(s) => s.parse::<ProvenanceStyle>()?,
        None => defaults.style,
      },
    })
  }
}

pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CurationStore,
{
  let options = params.options()?;
  let body = sieve_rdf::render(store.as_ref(), &options).await?;
  Ok(([(header::CONTENT_TYPE, options.format.media_type())], body))
}
