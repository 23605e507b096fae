//! Typed OpenAPI 3 object graph.
//!
//! The generator consumes an already-parsed document. These types mirror the
//! subset of the OpenAPI object model the transformation reads, with every map
//! backed by [`IndexMap`] so that iteration follows source declaration order.
//! Property order in particular drives column order downstream.

mod paths;
mod schema;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use paths::{MediaType, Operation, PathItem, RequestBody, Response};
pub use schema::{RefOr, Schema, SchemaType, SchemaTypeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub schemas: IndexMap<String, RefOr<Schema>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, RefOr<Response>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
}

/// Root of an OpenAPI 3.0 / 3.1 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
  #[serde(default)]
  pub openapi: String,
  #[serde(default)]
  pub info: Info,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub components: Option<Components>,
}

impl OpenApiDocument {
  /// Deserializes a document from an in-memory JSON value.
  pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
    serde_json::from_value(value)
  }

  /// Top-level schema definitions in declaration order.
  pub fn schemas(&self) -> impl Iterator<Item = (&String, &RefOr<Schema>)> {
    self.components.iter().flat_map(|c| c.schemas.iter())
  }

  pub fn schema(&self, name: &str) -> Option<&RefOr<Schema>> {
    self.components.as_ref().and_then(|c| c.schemas.get(name))
  }

  pub fn has_schema(&self, name: &str) -> bool {
    self.schema(name).is_some()
  }
}
