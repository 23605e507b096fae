use serde_json::Value;
use tracing::trace;

use super::{
  Attribute, Limits, SemanticType,
  type_mapping::{FOREIGN_KEY_DB_TYPE, JSON_DB_TYPE, infer_column_type, scalar_types},
};
use crate::{
  document::{RefOr, Schema},
  generator::{
    dialect::{ARRAY_MARKER, Dialect},
    errors::Result,
    resolver::RefResolver,
  },
  utils::SchemaExt,
};

/// Per-property flags supplied by the owning model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bon::Builder)]
pub struct AttributeContext {
  #[builder(default)]
  pub required: bool,
  #[builder(default)]
  pub is_primary: bool,
}

#[derive(Debug)]
struct TypeInfo {
  semantic: SemanticType,
  declared: String,
  reference: Option<String>,
}

/// Maps schema properties to [`Attribute`]s for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct AttributeBuilder<'r, 'a> {
  dialect: &'r Dialect,
  resolver: &'r RefResolver<'a>,
}

impl<'r, 'a> AttributeBuilder<'r, 'a> {
  pub fn new(dialect: &'r Dialect, resolver: &'r RefResolver<'a>) -> Self {
    Self { dialect, resolver }
  }

  /// Builds the attribute for property `name`.
  ///
  /// A direct reference to a top-level object schema yields the foreign-key
  /// column `<name>_id`; any other reference is resolved and treated inline.
  pub fn build(&self, name: &str, node: &'a RefOr<Schema>, context: AttributeContext) -> Result<Attribute> {
    if let Some(target) = self.resolver.model_ref_name(node)? {
      return Ok(self.build_foreign_key(name, &target, context));
    }

    match node {
      RefOr::Item(schema) => self.build_from_schema(name, schema, context),
      RefOr::Ref { ref_path } => self
        .resolver
        .expand(ref_path, |schema| self.build_from_schema(name, schema, context)),
    }
  }

  /// Synthesizes the integer column linking `name` to the model `target`.
  pub fn build_foreign_key(&self, name: &str, target: &str, context: AttributeContext) -> Attribute {
    let allow_null = !context.required;

    Attribute::builder()
      .property_name(name)
      .column_name(format!("{name}_id"))
      .semantic_type(SemanticType::Int)
      .db_type(FOREIGN_KEY_DB_TYPE)
      .column_type(infer_column_type(FOREIGN_KEY_DB_TYPE))
      .allow_null(allow_null)
      .required(context.required)
      .reference(target.to_string())
      .maybe_default_value(allow_null.then_some(Value::Null))
      .build()
  }

  fn build_from_schema(&self, name: &str, schema: &'a Schema, context: AttributeContext) -> Result<Attribute> {
    let types = self.derive_types(schema)?;

    let db_type_override = schema.db_type_override();
    let column_type = match db_type_override {
      Some(db_type) => self.dialect.map_override(name, db_type)?,
      None => infer_column_type(&types.declared),
    };

    let nullable = schema.nullable_flag();
    let allow_null = column_type != JSON_DB_TYPE && nullable.unwrap_or(!context.required);
    let default_value = schema.default.clone().or_else(|| allow_null.then_some(Value::Null));
    let auto_increment = context.is_primary && types.semantic == SemanticType::Int;

    trace!(property = name, column_type = %column_type, "built attribute");

    Ok(
      Attribute::builder()
        .property_name(name)
        .column_name(name)
        .semantic_type(types.semantic)
        .db_type(types.declared)
        .maybe_db_type_override(db_type_override.map(String::from))
        .column_type(column_type)
        .maybe_nullable(nullable)
        .allow_null(allow_null)
        .maybe_size(schema.max_length)
        .limits(Limits {
          min: schema.minimum.clone(),
          max: schema.maximum.clone(),
          min_length: schema.min_length,
        })
        .required(context.required)
        .read_only(schema.is_read_only())
        .maybe_reference(types.reference)
        .enum_values(schema.enum_strings())
        .maybe_default_value(default_value)
        .is_primary(context.is_primary)
        .auto_increment(auto_increment)
        .is_virtual(schema.is_virtual())
        .maybe_description(schema.description.clone())
        .build(),
    )
  }

  fn derive_types(&self, schema: &'a Schema) -> Result<TypeInfo> {
    if !schema.is_array() {
      let (semantic, declared) = scalar_types(schema, self.dialect);
      return Ok(TypeInfo {
        semantic,
        declared,
        reference: None,
      });
    }

    let element = match schema.items.as_deref() {
      Some(items) => self.element_types(items)?,
      None => TypeInfo {
        semantic: SemanticType::Json,
        declared: JSON_DB_TYPE.to_string(),
        reference: None,
      },
    };

    Ok(TypeInfo {
      semantic: SemanticType::array_of(element.semantic),
      declared: format!("{}{ARRAY_MARKER}", element.declared),
      reference: element.reference,
    })
  }

  fn element_types(&self, node: &'a RefOr<Schema>) -> Result<TypeInfo> {
    if let Some(target) = self.resolver.model_ref_name(node)? {
      return Ok(TypeInfo {
        semantic: SemanticType::Object,
        declared: JSON_DB_TYPE.to_string(),
        reference: Some(target),
      });
    }

    match node {
      RefOr::Item(schema) => self.derive_types(schema),
      RefOr::Ref { ref_path } => self.resolver.expand(ref_path, |schema| self.derive_types(schema)),
    }
  }
}
