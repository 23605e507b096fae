use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use oas3_modelgen::generator::{
  config::ModelgenConfig,
  model::{Cardinality, Model},
  orchestrator::Orchestrator,
  route::Route,
};

use super::generate::load_document;
use crate::ui::{Colors, colors::IntoComfyColor, term_width};

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(colors.label().into_comfy()));
  }
  table.set_header(row);
  table
}

fn relation_summary(model: &Model) -> String {
  model
    .relations
    .iter()
    .map(|(name, relation)| {
      let arrow = match relation.cardinality {
        Cardinality::ToOne => "->",
        Cardinality::ToMany => "->>",
      };
      format!("{name} {arrow} {}", relation.target_model)
    })
    .join(", ")
}

pub fn models_table(models: &[Model], colors: &Colors) -> Table {
  let mut table = new_table(colors, &["MODEL", "TABLE", "ATTRIBUTES", "RELATIONS"]);

  for model in models {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&model.name)
        .fg(colors.value().into_comfy())
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&model.table_name).fg(colors.primary().into_comfy()));
    row.add_cell(
      Cell::new(model.attributes.len())
        .fg(colors.primary().into_comfy())
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(relation_summary(model)).fg(colors.primary().into_comfy()));
    table.add_row(row);
  }

  table
}

pub fn routes_table(routes: &[Route], colors: &Colors) -> Table {
  let mut table = new_table(colors, &["METHOD", "PATH", "ROUTE", "MODEL", "WRAPPER"]);

  for route in routes {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(route.method.as_str())
        .fg(colors.method(&route.method).into_comfy())
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&route.path).fg(colors.primary().into_comfy()));
    row.add_cell(
      Cell::new(&route.route)
        .fg(colors.value().into_comfy())
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(match &route.model_class {
      Some(model) => Cell::new(model).fg(colors.primary().into_comfy()),
      None => Cell::new("-").fg(colors.muted().into_comfy()),
    });
    row.add_cell(match &route.response_wrapper {
      Some(wrapper) => Cell::new(wrapper.key()).fg(colors.primary().into_comfy()),
      None => Cell::new("-").fg(colors.muted().into_comfy()),
    });
    table.add_row(row);
  }

  table
}

pub async fn list_models(input: &Path, config: ModelgenConfig, colors: &Colors) -> anyhow::Result<()> {
  let document = load_document(input).await?;
  let models = Orchestrator::new(document, config).models()?;
  println!("{}", models_table(&models, colors));
  Ok(())
}

pub async fn list_routes(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = load_document(input).await?;
  let routes = Orchestrator::new(document, ModelgenConfig::default()).routes()?;
  println!("{}", routes_table(&routes, colors));
  Ok(())
}
