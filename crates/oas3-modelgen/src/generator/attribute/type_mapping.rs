use crate::{
  document::{Schema, SchemaType},
  generator::{attribute::SemanticType, dialect::{ARRAY_MARKER, Dialect}},
  utils::SchemaExt,
};

/// Case-insensitive prefix rules applied to declared types without an override.
const PREFIX_RULES: &[(&str, &str)] = &[
  ("int", "integer"),
  ("string", "string"),
  ("varchar", "string"),
  ("tsvector", "string"),
  ("json", "json"),
  ("datetime", "timestamp"),
];

pub(super) const JSON_DB_TYPE: &str = "json";
pub(super) const FOREIGN_KEY_DB_TYPE: &str = "int";

/// Maps a declared db type to its abstract column type by prefix.
///
/// Array markers are preserved; unmatched input passes through unchanged.
pub fn infer_column_type(declared: &str) -> String {
  let mut base = declared.trim();
  let mut markers = 0;
  while let Some(stripped) = base.strip_suffix(ARRAY_MARKER) {
    base = stripped.trim_end();
    markers += 1;
  }

  let lowered = base.to_ascii_lowercase();
  let Some((_, mapped)) = PREFIX_RULES.iter().find(|(prefix, _)| lowered.starts_with(*prefix)) else {
    return declared.to_string();
  };

  let mut result = (*mapped).to_string();
  for _ in 0..markers {
    result.push_str(ARRAY_MARKER);
  }
  result
}

/// Semantic and declared types of a non-array, non-reference schema.
pub(super) fn scalar_types(schema: &Schema, dialect: &Dialect) -> (SemanticType, String) {
  let format = schema.format.as_deref().unwrap_or_default();

  match schema.single_type() {
    Some(SchemaType::Integer) => {
      let declared = if format == "int64" { "bigint" } else { "int" };
      (SemanticType::Int, declared.to_string())
    }
    Some(SchemaType::Number) => {
      let declared = if format == "double" { "double" } else { "float" };
      (SemanticType::Float, declared.to_string())
    }
    Some(SchemaType::Boolean) => (SemanticType::Bool, "boolean".to_string()),
    Some(SchemaType::String) => (SemanticType::String, string_db_type(schema, format, dialect).to_string()),
    Some(SchemaType::Object) if !schema.properties.is_empty() => (SemanticType::Object, JSON_DB_TYPE.to_string()),
    None if !schema.properties.is_empty() => (SemanticType::Object, JSON_DB_TYPE.to_string()),
    _ => (SemanticType::Json, JSON_DB_TYPE.to_string()),
  }
}

fn string_db_type(schema: &Schema, format: &str, dialect: &Dialect) -> &'static str {
  match format {
    "date" => "date",
    "date-time" => dialect.datetime_db_type(),
    "time" => "time",
    "binary" => "binary",
    _ if schema.max_length.is_some() => "varchar",
    _ => "text",
  }
}
