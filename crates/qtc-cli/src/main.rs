//! QTC CLI - Offline driver for the freight quote extraction pipeline.

use anyhow::Context;
use clap::Parser;
use qtc_cli::commands;
use qtc_cli::{Cli, Command, Config, Formatter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config; remember whether the default location still needs writing
    let (config, write_defaults) = match &cli.config {
        Some(path) => (
            Config::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            false,
        ),
        None => {
            let exists = Config::path().map(|p| p.exists()).unwrap_or(false);
            let config = Config::load().context("Failed to load config")?;
            (config, !exists && cli.command.uses_config())
        }
    };

    // Logs go to stderr so that stdout carries only command output
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if write_defaults {
        match config.save() {
            Ok(()) => info!("Wrote default config to {}", Config::path()?.display()),
            Err(e) => warn!("Could not write default config: {}", e),
        }
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Process(args) => {
            commands::execute_process(args, &config, &formatter)
                .await
                .context("Processing failed")?;
        }
        Command::Inspect(args) => {
            commands::execute_inspect(args, &formatter)?;
        }
        Command::Schema => {
            commands::execute_schema()?;
        }
        Command::Cargo(args) => {
            commands::execute_cargo(args, &formatter)?;
        }
    }

    Ok(())
}
