//! Orchestration for the OpenAPI to model/route transformation.
//!
//! The `Orchestrator` owns one document and one [`ModelgenConfig`]. Each call
//! builds a fresh [`RefResolver`], so reference caches never outlive a run.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_modelgen::{
//!   document::OpenApiDocument,
//!   generator::{config::ModelgenConfig, dialect::Dialect, orchestrator::Orchestrator},
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("openapi.json")?;
//! let document: OpenApiDocument = serde_json::from_str(&json)?;
//! let config = ModelgenConfig::builder().dialect(Dialect::PostgreSql).build();
//!
//! let output = Orchestrator::new(document, config).run()?;
//! println!("{} models, {} routes", output.models.len(), output.routes.len());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::{
  document::OpenApiDocument,
  generator::{
    attribute::AttributeBuilder,
    config::ModelgenConfig,
    errors::Result,
    metrics::TransformStats,
    model::{Model, ModelExtractor},
    resolver::RefResolver,
    route::{KnownModelClasses, Route, RouteInference},
  },
};

/// Result of one transformation run, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformOutput {
  pub models: Vec<Model>,
  pub routes: Vec<Route>,
  #[serde(skip)]
  pub stats: TransformStats,
}

/// Metadata about the OpenAPI document, for reporting.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// Runs model extraction and route inference over one document.
#[derive(Debug)]
pub struct Orchestrator {
  document: OpenApiDocument,
  config: ModelgenConfig,
}

impl Orchestrator {
  pub fn new(document: OpenApiDocument, config: ModelgenConfig) -> Self {
    Self { document, config }
  }

  pub fn metadata(&self) -> DocumentMetadata {
    DocumentMetadata {
      title: self.document.info.title.clone(),
      version: self.document.info.version.clone(),
      description: self.document.info.description.clone(),
    }
  }

  pub fn config(&self) -> &ModelgenConfig {
    &self.config
  }

  /// Extracts models and infers routes.
  ///
  /// Any error aborts the whole run; nothing partial is returned.
  pub fn run(&self) -> Result<TransformOutput> {
    let resolver = RefResolver::new(&self.document);
    let mut stats = TransformStats::default();

    let models = self.extract_models(&resolver, &mut stats)?;
    let routes = Self::infer_routes(&resolver, &mut stats)?;

    Ok(TransformOutput { models, routes, stats })
  }

  /// Extracts models only.
  pub fn models(&self) -> Result<Vec<Model>> {
    let resolver = RefResolver::new(&self.document);
    self.extract_models(&resolver, &mut TransformStats::default())
  }

  /// Infers routes only.
  pub fn routes(&self) -> Result<Vec<Route>> {
    let resolver = RefResolver::new(&self.document);
    Self::infer_routes(&resolver, &mut TransformStats::default())
  }

  fn extract_models(&self, resolver: &RefResolver<'_>, stats: &mut TransformStats) -> Result<Vec<Model>> {
    let attributes = AttributeBuilder::new(&self.config.dialect, resolver);
    ModelExtractor::new(resolver, attributes, &self.config.excluded_models).extract(stats)
  }

  fn infer_routes(resolver: &RefResolver<'_>, stats: &mut TransformStats) -> Result<Vec<Route>> {
    let mut known = KnownModelClasses::default();
    RouteInference::new(resolver).infer(&mut known, stats)
  }
}
