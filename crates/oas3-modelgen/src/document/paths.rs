use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::{RefOr, Schema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<RefOr<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
  #[serde(default)]
  pub description: String,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RefOr<RequestBody>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, RefOr<Response>>,
  /// `x-route`: replaces the inferred `controller/action` string.
  #[serde(rename = "x-route", default, skip_serializing_if = "Option::is_none")]
  pub x_route: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub get: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub put: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub post: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub delete: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub head: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patch: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trace: Option<Operation>,
}

impl PathItem {
  /// Defined operations in OpenAPI field order: get, put, post, delete,
  /// options, head, patch, trace.
  pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
    [
      (Method::GET, self.get.as_ref()),
      (Method::PUT, self.put.as_ref()),
      (Method::POST, self.post.as_ref()),
      (Method::DELETE, self.delete.as_ref()),
      (Method::OPTIONS, self.options.as_ref()),
      (Method::HEAD, self.head.as_ref()),
      (Method::PATCH, self.patch.as_ref()),
      (Method::TRACE, self.trace.as_ref()),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.map(|op| (method, op)))
  }
}
