//! Model descriptors extracted from top-level component schemas.

mod extractor;

use indexmap::IndexMap;
use serde::Serialize;

pub use extractor::ModelExtractor;

use crate::{
  document::{RefOr, Schema},
  generator::{attribute::Attribute, errors::Result, resolver::RefResolver},
  utils::SchemaExt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
  ToOne,
  ToMany,
}

/// An association to another model, expressed as a column-link pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
  pub target_model: String,
  pub cardinality: Cardinality,
  pub link: IndexMap<String, String>,
}

impl Relation {
  pub fn new(target_model: String, cardinality: Cardinality, key: String, value: String) -> Self {
    Self {
      target_model,
      cardinality,
      link: IndexMap::from([(key, value)]),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
  pub name: String,
  pub table_name: String,
  pub description: Option<String>,
  pub attributes: Vec<Attribute>,
  pub relations: IndexMap<String, Relation>,
}

impl Model {
  pub fn attribute(&self, property_name: &str) -> Option<&Attribute> {
    self.attributes.iter().find(|a| a.property_name == property_name)
  }

  pub fn primary_key(&self) -> Option<&Attribute> {
    self.attributes.iter().find(|a| a.is_primary)
  }
}

/// How a single property participates in a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
  Scalar,
  ToOne { target: String },
  ToMany { target: String },
}

impl PropertyKind {
  /// Classifies a property node.
  ///
  /// Only direct references to top-level object schemas, or inline arrays of
  /// them, are relations. Everything else is a scalar attribute.
  pub fn classify(resolver: &RefResolver<'_>, node: &RefOr<Schema>) -> Result<Self> {
    if let Some(target) = resolver.model_ref_name(node)? {
      return Ok(Self::ToOne { target });
    }

    if let RefOr::Item(schema) = node
      && schema.is_array()
      && let Some(items) = schema.items.as_deref()
      && let Some(target) = resolver.model_ref_name(items)?
    {
      return Ok(Self::ToMany { target });
    }

    Ok(Self::Scalar)
  }
}
