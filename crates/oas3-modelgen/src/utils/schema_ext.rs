use crate::document::{Schema, SchemaType, SchemaTypeSet};

pub(crate) const DEFAULT_PRIMARY_KEY: &str = "id";

/// Extension methods for `Schema` to query its type properties conveniently.
pub(crate) trait SchemaExt {
  /// Returns the single non-null `SchemaType`, if exactly one is declared.
  /// `[string, null]` yields `string`.
  fn single_type(&self) -> Option<SchemaType>;

  /// Returns true if the type set includes `null` (3.1 style nullability).
  fn has_null_type(&self) -> bool;

  /// Explicit nullability: `nullable: true|false`, or `null` listed in `type`.
  /// `None` when the schema says nothing either way.
  fn nullable_flag(&self) -> Option<bool>;

  /// Returns true for `type: object` or an untyped schema with properties.
  fn is_object(&self) -> bool;

  fn is_array(&self) -> bool;

  /// The non-empty `x-db-type` string override, if any.
  fn db_type_override(&self) -> Option<&str>;

  /// Returns true when `x-db-type: false` marks the property as not stored.
  fn is_virtual(&self) -> bool;

  /// Name of the primary-key property (`x-pk`, defaulting to `id`).
  fn primary_key_name(&self) -> &str;

  fn is_excluded(&self) -> bool;

  fn is_read_only(&self) -> bool;

  /// Enum values rendered as strings; non-string scalars use their JSON text.
  fn enum_strings(&self) -> Vec<String>;
}

impl SchemaExt for Schema {
  fn single_type(&self) -> Option<SchemaType> {
    match self.schema_type.as_ref()? {
      SchemaTypeSet::Single(SchemaType::Null) => None,
      SchemaTypeSet::Single(single) => Some(*single),
      SchemaTypeSet::Multiple(types) => {
        let mut non_null = types.iter().filter(|t| **t != SchemaType::Null);
        match (non_null.next(), non_null.next()) {
          (Some(single), None) => Some(*single),
          _ => None,
        }
      }
    }
  }

  fn has_null_type(&self) -> bool {
    self
      .schema_type
      .as_ref()
      .is_some_and(|set| set.contains(SchemaType::Null))
  }

  fn nullable_flag(&self) -> Option<bool> {
    if self.nullable.is_some() {
      return self.nullable;
    }
    self.has_null_type().then_some(true)
  }

  fn is_object(&self) -> bool {
    match self.single_type() {
      Some(schema_type) => schema_type == SchemaType::Object,
      None => self.schema_type.is_none() && !self.properties.is_empty(),
    }
  }

  fn is_array(&self) -> bool {
    self.single_type() == Some(SchemaType::Array)
  }

  fn db_type_override(&self) -> Option<&str> {
    self
      .x_db_type
      .as_ref()
      .and_then(serde_json::Value::as_str)
      .map(str::trim)
      .filter(|s| !s.is_empty())
  }

  fn is_virtual(&self) -> bool {
    matches!(self.x_db_type, Some(serde_json::Value::Bool(false)))
  }

  fn primary_key_name(&self) -> &str {
    self.x_pk.as_deref().unwrap_or(DEFAULT_PRIMARY_KEY)
  }

  fn is_excluded(&self) -> bool {
    self.x_excluded.unwrap_or(false)
  }

  fn is_read_only(&self) -> bool {
    self.read_only.unwrap_or(false)
  }

  fn enum_strings(&self) -> Vec<String> {
    self
      .enum_values
      .iter()
      .filter(|value| !value.is_null())
      .map(|value| match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
      })
      .collect()
  }
}
