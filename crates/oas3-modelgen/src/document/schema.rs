use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// Either a `$ref` pointer or an inline object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Item(T),
}

impl<T> RefOr<T> {
  pub fn as_ref_path(&self) -> Option<&str> {
    match self {
      Self::Ref { ref_path } => Some(ref_path),
      Self::Item(_) => None,
    }
  }

  pub fn as_item(&self) -> Option<&T> {
    match self {
      Self::Ref { .. } => None,
      Self::Item(item) => Some(item),
    }
  }

  pub fn new_ref(ref_path: impl Into<String>) -> Self {
    Self::Ref {
      ref_path: ref_path.into(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  Boolean,
  Integer,
  Number,
  String,
  Array,
  Object,
  Null,
}

/// The `type` keyword: a single name (3.0) or a list of names (3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypeSet {
  Single(SchemaType),
  Multiple(Vec<SchemaType>),
}

impl SchemaTypeSet {
  pub fn contains(&self, schema_type: SchemaType) -> bool {
    match self {
      Self::Single(single) => *single == schema_type,
      Self::Multiple(types) => types.contains(&schema_type),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub schema_type: Option<SchemaTypeSet>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub properties: IndexMap<String, RefOr<Schema>>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<RefOr<Schema>>>,
  #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<serde_json::Value>,
  /// `Some(Value::Null)` when the document spells out `"default": null`.
  #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
  pub default: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nullable: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub read_only: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_length: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub minimum: Option<serde_json::Number>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub maximum: Option<serde_json::Number>,

  /// `x-db-type`: a string overrides the column type for the active dialect,
  /// `false` marks the property as virtual.
  #[serde(rename = "x-db-type", default, skip_serializing_if = "Option::is_none")]
  pub x_db_type: Option<serde_json::Value>,
  #[serde(rename = "x-table", default, skip_serializing_if = "Option::is_none")]
  pub x_table: Option<String>,
  #[serde(rename = "x-pk", default, skip_serializing_if = "Option::is_none")]
  pub x_pk: Option<String>,
  #[serde(rename = "x-excluded", default, skip_serializing_if = "Option::is_none")]
  pub x_excluded: Option<bool>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
  D: Deserializer<'de>,
{
  serde_json::Value::deserialize(deserializer).map(Some)
}
