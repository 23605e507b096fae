use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use super::{Cardinality, Model, PropertyKind, Relation};
use crate::{
  document::{RefOr, Schema},
  generator::{
    attribute::{Attribute, AttributeBuilder, AttributeContext},
    errors::{ModelgenError, Result},
    metrics::{SkipReason, TransformStats, TransformWarning},
    naming,
    resolver::RefResolver,
  },
  utils::{SchemaExt, extract_schema_ref_name, refs::SCHEMA_REF_PREFIX},
};

/// Builds [`Model`]s from the document's top-level schemas.
#[derive(Debug)]
pub struct ModelExtractor<'r, 'a> {
  resolver: &'r RefResolver<'a>,
  attributes: AttributeBuilder<'r, 'a>,
  excluded: &'r BTreeSet<String>,
}

impl<'r, 'a> ModelExtractor<'r, 'a> {
  pub fn new(resolver: &'r RefResolver<'a>, attributes: AttributeBuilder<'r, 'a>, excluded: &'r BTreeSet<String>) -> Self {
    Self {
      resolver,
      attributes,
      excluded,
    }
  }

  /// Extracts every eligible schema, in declaration order.
  ///
  /// Skipped schemas are recorded as warnings in `stats`.
  pub fn extract(&self, stats: &mut TransformStats) -> Result<Vec<Model>> {
    let mut models = vec![];

    for (name, node) in self.resolver.document().schemas() {
      let schema = match node {
        RefOr::Item(schema) => schema,
        RefOr::Ref { ref_path } => {
          let resolved = self.resolver.resolve(ref_path)?;
          if let Some(target) = extract_schema_ref_name(node) {
            Self::skip(stats, name, SkipReason::Alias { target });
            continue;
          }
          resolved
        }
      };

      if let Some(reason) = self.skip_reason(name, schema) {
        Self::skip(stats, name, reason);
        continue;
      }

      let model = self.extract_model(name, schema)?;
      debug!(
        model = %model.name,
        attributes = model.attributes.len(),
        relations = model.relations.len(),
        "extracted model"
      );
      stats.record_model(&model);
      models.push(model);
    }

    Ok(models)
  }

  /// Builds the model for a single object schema.
  pub fn extract_model(&self, name: &str, schema: &'a Schema) -> Result<Model> {
    let primary_key = schema.primary_key_name();
    let mut attributes = vec![];
    let mut relations = IndexMap::new();

    for (property, node) in &schema.properties {
      let required = schema.required.contains(property);

      match PropertyKind::classify(self.resolver, node)? {
        PropertyKind::ToOne { target } => {
          let context = AttributeContext::builder().required(required).build();
          let foreign_key = self.attributes.build_foreign_key(property, &target, context);
          let target_pk = self.target_primary_key(&target)?;
          let relation = Relation::new(target, Cardinality::ToOne, target_pk, foreign_key.column_name.clone());
          attributes.push(foreign_key);
          relations.insert(property.clone(), relation);
        }
        PropertyKind::ToMany { target } => {
          let target_pk = self.target_primary_key(&target)?;
          let relation = Relation::new(target, Cardinality::ToMany, naming::owner_link_column(name), target_pk);
          relations.insert(property.clone(), relation);
        }
        PropertyKind::Scalar => {
          let context = AttributeContext::builder()
            .required(required)
            .is_primary(property == primary_key)
            .build();
          attributes.push(self.attributes.build(property, node, context)?);
        }
      }
    }

    check_columns(name, &attributes)?;

    let table_name = match schema.x_table.as_deref() {
      Some(table) => naming::table_placeholder(table),
      None => naming::table_name(name),
    };

    Ok(Model {
      name: name.to_string(),
      table_name,
      description: schema.description.clone().or_else(|| schema.title.clone()),
      attributes,
      relations,
    })
  }

  fn skip_reason(&self, name: &str, schema: &Schema) -> Option<SkipReason> {
    if self.excluded.contains(name) || schema.is_excluded() {
      Some(SkipReason::Excluded)
    } else if !schema.is_object() {
      Some(SkipReason::NotAnObject)
    } else if schema.properties.is_empty() {
      Some(SkipReason::NoProperties)
    } else {
      None
    }
  }

  fn skip(stats: &mut TransformStats, name: &str, reason: SkipReason) {
    warn!(schema = name, reason = %reason, "skipping schema");
    stats.record_warning(TransformWarning::SchemaSkipped {
      schema_name: name.to_string(),
      reason,
    });
  }

  fn target_primary_key(&self, target: &str) -> Result<String> {
    let document = self.resolver.document();
    let node = document.schema(target).ok_or_else(|| ModelgenError::DanglingReference {
      pointer: format!("{SCHEMA_REF_PREFIX}{target}"),
    })?;
    let schema = self.resolver.resolve_schema(node)?;
    Ok(schema.primary_key_name().to_string())
  }
}

fn check_columns(model: &str, attributes: &[Attribute]) -> Result<()> {
  let mut columns = IndexSet::new();
  let mut primary: Option<&str> = None;

  for attribute in attributes {
    if !columns.insert(attribute.column_name.as_str()) {
      return Err(ModelgenError::invalid_definition(
        &attribute.property_name,
        format!("duplicate column '{}' in model '{model}'", attribute.column_name),
      ));
    }

    if attribute.is_primary
      && let Some(existing) = primary
    {
      return Err(ModelgenError::invalid_definition(
        &attribute.property_name,
        format!("model '{model}' already has primary key '{existing}'"),
      ));
    }
    if attribute.is_primary {
      primary = Some(attribute.property_name.as_str());
    }
  }

  Ok(())
}
