//! Attribute descriptors: one typed column (or virtual field) per schema property.

mod builder;
mod type_mapping;

use std::fmt;

use serde::{Serialize, Serializer};

pub use builder::{AttributeBuilder, AttributeContext};
pub use type_mapping::infer_column_type;

/// Language-neutral type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
  Int,
  Bool,
  Float,
  String,
  Json,
  Object,
  Array(Box<SemanticType>),
}

impl SemanticType {
  pub fn array_of(element: SemanticType) -> Self {
    Self::Array(Box::new(element))
  }

  pub fn is_array(&self) -> bool {
    matches!(self, Self::Array(_))
  }
}

impl fmt::Display for SemanticType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int => f.write_str("int"),
      Self::Bool => f.write_str("bool"),
      Self::Float => f.write_str("float"),
      Self::String => f.write_str("string"),
      Self::Json => f.write_str("json"),
      Self::Object => f.write_str("object"),
      Self::Array(element) => write!(f, "{element}[]"),
    }
  }
}

impl Serialize for SemanticType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Numeric and length bounds copied from the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min: Option<serde_json::Number>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max: Option<serde_json::Number>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<u64>,
}

impl Limits {
  pub fn is_empty(&self) -> bool {
    self.min.is_none() && self.max.is_none() && self.min_length.is_none()
  }
}

/// A resolved model property.
///
/// `db_type` is the declared physical type (`varchar`, `int[]`, ...), while
/// `column_type` is the abstract type it maps to (`string`, `integer[]`, ...).
/// `default_value` distinguishes "no default" (`None`) from a `NULL` default
/// (`Some(Value::Null)`).
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
#[builder(builder_type = AttributeDraft)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
  #[builder(into)]
  pub property_name: String,
  #[builder(into)]
  pub column_name: String,
  pub semantic_type: SemanticType,
  #[builder(into)]
  pub db_type: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub db_type_override: Option<String>,
  #[builder(into)]
  pub column_type: String,
  pub nullable: Option<bool>,
  #[builder(default)]
  pub allow_null: bool,
  pub size: Option<u64>,
  #[builder(default)]
  #[serde(skip_serializing_if = "Limits::is_empty")]
  pub limits: Limits,
  #[builder(default)]
  pub required: bool,
  #[builder(default)]
  pub read_only: bool,
  pub reference: Option<String>,
  #[builder(default)]
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default_value: Option<serde_json::Value>,
  #[builder(default)]
  pub is_primary: bool,
  #[builder(default)]
  pub auto_increment: bool,
  #[builder(default)]
  pub is_virtual: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Attribute {
  pub fn is_foreign_key(&self) -> bool {
    self.reference.is_some() && !self.semantic_type.is_array()
  }
}
