#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Commands, ListCommands, colors};

mod ui;

/// Library diagnostics go to stderr; `--verbose` forces `debug`, otherwise `RUST_LOG` or `warn`.
fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("oas3_modelgen=debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = ui::Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => {
      init_tracing(false);
      match list_command {
        ListCommands::Models { input, target } => ui::commands::list_models(&input, target.config(), &colors).await?,
        ListCommands::Routes { input } => ui::commands::list_routes(&input, &colors).await?,
      }
    }
    Commands::Generate(command) => {
      init_tracing(command.verbose);
      let config = ui::commands::GenerateConfig::from_command(command);
      ui::commands::generate_models(config, &colors).await?;
    }
  }

  Ok(())
}
