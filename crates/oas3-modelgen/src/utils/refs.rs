use crate::document::{RefOr, Schema};

pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A parsed local JSON pointer (`#/a/b/c`).
///
/// Segments are unescaped per RFC 6901: `~1` becomes `/` and `~0` becomes `~`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
  segments: Vec<String>,
}

impl JsonPointer {
  /// Returns `None` for external references (anything not starting with `#/`).
  pub fn parse(pointer: &str) -> Option<Self> {
    let body = pointer.strip_prefix("#/")?;
    if body.is_empty() {
      return None;
    }

    let segments = body
      .split('/')
      .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
      .collect();

    Some(Self { segments })
  }

  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  /// Returns the `(kind, name, rest)` triple of a `#/components/<kind>/<name>/...` pointer.
  pub fn component(&self) -> Option<(&str, &str, &[String])> {
    match self.segments.as_slice() {
      [root, kind, name, rest @ ..] if root == "components" => Some((kind.as_str(), name.as_str(), rest)),
      _ => None,
    }
  }
}

/// Parses a schema `$ref` path and extracts the referenced schema name.
///
/// Only pointers of the exact shape `#/components/schemas/NAME` qualify. Nested
/// pointers such as `#/components/schemas/User/properties/id` and external
/// references return `None`; they are treated as inline values.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  let pointer = JsonPointer::parse(ref_path)?;
  match pointer.component()? {
    ("schemas", name, []) if !name.is_empty() => Some(name.to_string()),
    _ => None,
  }
}

/// Extracts the schema name from a [`RefOr`] when it points at a top-level schema.
pub fn extract_schema_ref_name(obj_ref: &RefOr<Schema>) -> Option<String> {
  obj_ref.as_ref_path().and_then(parse_schema_ref_path)
}
