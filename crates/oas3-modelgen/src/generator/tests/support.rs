use std::collections::BTreeSet;

use crate::{
  document::OpenApiDocument,
  generator::{config::ModelgenConfig, dialect::Dialect, orchestrator::Orchestrator},
};

pub(super) const BLOG_API: &str = include_str!("../../../fixtures/blog_api.json");

pub(super) fn parse_document(json: &str) -> OpenApiDocument {
  serde_json::from_str(json).expect("failed to parse test document")
}

pub(super) fn make_orchestrator(json: &str, dialect: Dialect, excluded: &[&str]) -> Orchestrator {
  let config = ModelgenConfig::builder()
    .dialect(dialect)
    .excluded_models(excluded.iter().map(ToString::to_string).collect::<BTreeSet<_>>())
    .build();
  Orchestrator::new(parse_document(json), config)
}
