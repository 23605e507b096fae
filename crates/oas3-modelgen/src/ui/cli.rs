use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oas3_modelgen::generator::{config::ModelgenConfig, dialect::Dialect};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-modelgen")]
#[command(author, version, about = "Derive database models and controller routes from OpenAPI v3 specifications")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List what would be derived from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Derive models and routes and write them as JSON
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the JSON output will be written (stdout when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  #[command(flatten)]
  pub target: TargetArgs,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

/// Database and schema selection shared by every command that runs the transformation.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
  /// Database driver name (mysql, mariadb, pgsql, sqlite, ...)
  #[arg(long, value_name = "DRIVER", default_value = "mysql")]
  pub dialect: String,

  /// Server version string, used to tell MariaDB apart from MySQL
  #[arg(long, value_name = "VERSION")]
  pub server_version: Option<String>,

  /// Top-level schemas never turned into models (comma-separated names)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub exclude: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the models extracted from the component schemas
  Models {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    target: TargetArgs,
  },
  /// List the routes inferred from the paths
  Routes {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

impl TargetArgs {
  pub fn config(&self) -> ModelgenConfig {
    ModelgenConfig::builder()
      .dialect(Dialect::detect(&self.dialect, self.server_version.as_deref()))
      .excluded_models(
        self
          .exclude
          .iter()
          .map(|name| name.trim())
          .filter(|name| !name.is_empty())
          .map(ToString::to_string)
          .collect(),
      )
      .build()
  }
}
