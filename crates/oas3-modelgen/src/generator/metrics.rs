use strum::Display;

use crate::generator::{
  model::{Cardinality, Model},
  route::Route,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformStats {
  pub models_extracted: usize,
  pub attributes_built: usize,
  pub to_one_relations: usize,
  pub to_many_relations: usize,
  pub routes_inferred: usize,
  pub routes_with_model: usize,
  pub routes_with_wrapper: usize,
  pub model_classes_reused: usize,
  pub warnings: Vec<TransformWarning>,
}

impl TransformStats {
  pub fn record_model(&mut self, model: &Model) {
    self.models_extracted += 1;
    self.attributes_built += model.attributes.len();
    for relation in model.relations.values() {
      match relation.cardinality {
        Cardinality::ToOne => self.to_one_relations += 1,
        Cardinality::ToMany => self.to_many_relations += 1,
      }
    }
  }

  pub fn record_route(&mut self, route: &Route) {
    self.routes_inferred += 1;
    if route.model_class.is_some() {
      self.routes_with_model += 1;
    } else {
      self.record_warning(TransformWarning::RouteWithoutModel {
        method: route.method.to_string(),
        path: route.path.clone(),
      });
    }
    if route.response_wrapper.is_some() {
      self.routes_with_wrapper += 1;
    }
  }

  pub fn record_model_class_reuse(&mut self) {
    self.model_classes_reused += 1;
  }

  pub fn record_warning(&mut self, warning: TransformWarning) {
    self.warnings.push(warning);
  }

  pub fn skipped_schemas(&self) -> usize {
    self.warnings.iter().filter(|w| w.is_skipped_schema()).count()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SkipReason {
  #[strum(to_string = "excluded")]
  Excluded,
  #[strum(to_string = "not an object schema")]
  NotAnObject,
  #[strum(to_string = "no properties")]
  NoProperties,
  #[strum(to_string = "alias of '{target}'")]
  Alias { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TransformWarning {
  #[strum(to_string = "Skipped schema '{schema_name}': {reason}")]
  SchemaSkipped { schema_name: String, reason: SkipReason },
  #[strum(to_string = "No model class found for '{method} {path}'")]
  RouteWithoutModel { method: String, path: String },
}

impl TransformWarning {
  pub fn is_skipped_schema(&self) -> bool {
    matches!(self, Self::SchemaSkipped { .. })
  }
}
