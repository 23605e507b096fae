use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas3_modelgen::{
  document::OpenApiDocument,
  generator::{
    config::ModelgenConfig,
    metrics::TransformStats,
    orchestrator::{Orchestrator, TransformOutput},
  },
  utils::spec::SpecLoader,
};

use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: Option<PathBuf>,
  pub modelgen: ModelgenConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      target,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      modelgen: target.config(),
      verbose,
      quiet,
    }
  }

  async fn load_document(&self) -> anyhow::Result<OpenApiDocument> {
    load_document(&self.input).await
  }

  async fn write_output(&self, json: String) -> anyhow::Result<()> {
    let Some(output) = &self.output else {
      println!("{json}");
      return Ok(());
    };

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, json).await?;
    Ok(())
  }
}

pub(crate) async fn load_document(input: &Path) -> anyhow::Result<OpenApiDocument> {
  SpecLoader::open(input).await?.parse()
}

/// Pretty JSON document with the `models` and `routes` arrays.
pub fn render_output(output: &TransformOutput) -> anyhow::Result<String> {
  let mut json = serde_json::to_string_pretty(output)?;
  json.push('\n');
  Ok(json)
}

/// Progress and statistics printer.
///
/// When the JSON goes to stdout, every progress line is sent to stderr instead.
struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn emit(&self, line: &str) {
    if self.config.output.is_some() {
      println!("{line}");
    } else {
      eprintln!("{line}");
    }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      self.emit(&format!("{} {message}", format_timestamp().with(self.colors.timestamp())));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      self.emit(&format!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      ));
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_transforming(&self, orchestrator: &Orchestrator) {
    let metadata = orchestrator.metadata();
    self.info(
      &format!(
        "Deriving models and routes for {} {} ({})",
        metadata.title,
        metadata.version,
        orchestrator.config().dialect
      )
      .with(self.colors.primary())
      .to_string(),
    );
  }

  fn print_statistics(&self, stats: &TransformStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Models extracted:", stats.models_extracted.to_string());
    self.stat("", format!("{} attributes", stats.attributes_built));
    self.stat(
      "",
      format!(
        "{} toOne, {} toMany relations",
        stats.to_one_relations, stats.to_many_relations
      ),
    );
    let skipped = stats.skipped_schemas();
    if skipped > 0 {
      self.stat("", format!("{skipped} schemas skipped"));
    }

    self.stat("Routes inferred:", stats.routes_inferred.to_string());
    self.stat("", format!("{} with a model class", stats.routes_with_model));
    self.stat("", format!("{} with a response wrapper", stats.routes_with_wrapper));
    if self.config.verbose && stats.model_classes_reused > 0 {
      self.stat("", format!("{} model classes reused", stats.model_classes_reused));
    }

    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &TransformStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !(warning.is_skipped_schema() || self.config.verbose) {
        continue;
      }

      if !printed_header {
        eprintln!();
        printed_header = true;
      }

      let label = if warning.is_skipped_schema() {
        "Skipped:"
      } else {
        "Warning:"
      };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    let target = self
      .config
      .output
      .as_ref()
      .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
    self.info(&format!("Writing to: {target}").with(self.colors.primary()).to_string());
  }

  fn log_success(&self) {
    if !self.config.quiet {
      self.emit("");
      self.emit(&format!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully derived models and routes".with(self.colors.success())
      ));
    }
  }
}

pub async fn generate_models(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;

  let orchestrator = Orchestrator::new(document, config.modelgen.clone());
  logger.log_transforming(&orchestrator);
  let output = orchestrator.run()?;
  logger.print_statistics(&output.stats);

  logger.log_writing();
  config.write_output(render_output(&output)?).await?;

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use oas3_modelgen::generator::dialect::Dialect;

  use super::*;
  use crate::ui::{cli::TargetArgs, colors::Theme};

  const BLOG_API: &str = include_str!("../../../fixtures/blog_api.json");

  fn command(input: PathBuf, output: Option<PathBuf>, exclude: &[&str]) -> GenerateCommand {
    GenerateCommand {
      input,
      output,
      target: TargetArgs {
        dialect: "pgsql".to_string(),
        server_version: None,
        exclude: exclude.iter().map(ToString::to_string).collect(),
      },
      verbose: false,
      quiet: true,
    }
  }

  #[test]
  fn test_config_from_command() {
    let config = GenerateConfig::from_command(command(PathBuf::from("api.json"), None, &["Comment", " ", "Audit "]));

    assert_eq!(config.modelgen.dialect, Dialect::PostgreSql);
    assert_eq!(
      config.modelgen.excluded_models,
      BTreeSet::from(["Audit".to_string(), "Comment".to_string()])
    );
    assert!(config.output.is_none());
  }

  #[test]
  fn test_mariadb_detected_from_server_version() {
    let target = TargetArgs {
      dialect: "mysql".to_string(),
      server_version: Some("10.11.6-MariaDB".to_string()),
      exclude: vec![],
    };
    assert_eq!(target.config().dialect, Dialect::MariaDb);
  }

  #[tokio::test]
  async fn test_generate_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blog_api.json");
    std::fs::write(&input, BLOG_API).unwrap();
    let output = dir.path().join("out/models.json");

    let config = GenerateConfig::from_command(command(input, Some(output.clone()), &["Comment"]));
    generate_models(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
    let names: Vec<&str> = written["models"]
      .as_array()
      .unwrap()
      .iter()
      .map(|m| m["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["User", "Post"]);
    assert_eq!(written["models"][0]["attributes"][5]["dbType"], "timestamp");
    assert_eq!(written["routes"].as_array().unwrap().len(), 8);
  }

  #[tokio::test]
  async fn test_generate_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerateConfig::from_command(command(dir.path().join("missing.json"), None, &[]));

    assert!(generate_models(config, &Colors::new(false, Theme::Dark)).await.is_err());
  }

  #[tokio::test]
  async fn test_generate_propagates_transform_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blog_api.json");
    std::fs::write(&input, BLOG_API).unwrap();

    let mut cmd = command(input, Some(dir.path().join("out.json")), &[]);
    cmd.target.dialect = "sqlite".to_string();
    let err = generate_models(GenerateConfig::from_command(cmd), &Colors::new(false, Theme::Dark))
      .await
      .unwrap_err();

    assert!(err.to_string().contains("sqlite"));
    assert!(!dir.path().join("out.json").exists());
  }

  #[test]
  fn test_render_output_is_pretty_with_trailing_newline() {
    let document: OpenApiDocument = serde_json::from_str(BLOG_API).unwrap();
    let output = Orchestrator::new(document, ModelgenConfig::default()).run().unwrap();
    let json = render_output(&output).unwrap();

    assert!(json.starts_with("{\n  \"models\": ["));
    assert!(json.ends_with("}\n"));
  }
}
