//! Controller/action routes inferred from path templates and operations.

mod inference;
mod path;

use http::Method;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

pub use inference::RouteInference;
pub use path::{PathSegment, PathTemplate, PathTemplateError, SegmentPart};

/// Where the model sits inside a wrapped payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseWrapper {
  /// `{"<key>": Model}`
  ItemKey(String),
  /// `{"<key>": [Model]}`
  ItemsKey(String),
}

impl ResponseWrapper {
  pub fn key(&self) -> &str {
    match self {
      Self::ItemKey(key) | Self::ItemsKey(key) => key.as_str(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
  pub path: String,
  #[serde(serialize_with = "serialize_method")]
  pub method: Method,
  pub pattern: String,
  pub route: String,
  pub path_params: Vec<String>,
  pub model_class: Option<String>,
  pub response_wrapper: Option<ResponseWrapper>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(method.as_str())
}

/// Last model class resolved per path, carried across that path's methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownModelClasses {
  by_path: IndexMap<String, String>,
}

impl KnownModelClasses {
  pub fn get(&self, path: &str) -> Option<&str> {
    self.by_path.get(path).map(String::as_str)
  }

  pub fn record(&mut self, path: &str, model_class: &str) {
    self.by_path.insert(path.to_string(), model_class.to_string());
  }

  pub fn len(&self) -> usize {
    self.by_path.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_path.is_empty()
  }
}

#[cfg(test)]
mod tests;
