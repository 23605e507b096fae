//! Naming contract shared with the emission layer.

use inflections::Inflect;

pub(crate) const DEFAULT_CONTROLLER: &str = "default";

/// Table name placeholder for a model: `{{%<plural_snake_case_name>}}`.
pub fn table_name(model: &str) -> String {
  table_placeholder(&cruet::to_plural(&model.to_snake_case()))
}

/// Wraps a raw table name in the `{{%name}}` placeholder.
pub fn table_placeholder(table: &str) -> String {
  format!("{{{{%{table}}}}}")
}

/// Name of the column on the "many" side linking back to `model`.
pub fn owner_link_column(model: &str) -> String {
  format!("{}_id", model.to_snake_case())
}

/// Kebab-cased form of a literal path segment.
pub fn route_segment(segment: &str) -> String {
  segment.to_kebab_case()
}

/// Controller id from the literal segments preceding the first parameter.
pub fn controller_id(segments: &[String]) -> String {
  if segments.is_empty() {
    return DEFAULT_CONTROLLER.to_string();
  }
  cruet::to_singular(&segments.join("-"))
}
