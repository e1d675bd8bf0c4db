//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QTC - Turn freight quote request emails into validated quote records.
#[derive(Debug, Parser)]
#[command(name = "qtc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "QTC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. debug, qtc_extractor=debug)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a saved message and its attachments through the whole pipeline
    Process(ProcessArgs),

    /// Show the parsed email and its key/value table
    Inspect(InspectArgs),

    /// Print the JSON Schema of the quote record
    Schema,

    /// Pull dimensions and weights out of a free-text cargo description
    Cargo(CargoArgs),
}

impl Command {
    /// Whether the command reads provider or validation settings
    ///
    /// Only these commands write the default config on first run.
    pub fn uses_config(&self) -> bool {
        matches!(self, Command::Process(_))
    }
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Graph message JSON file
    #[arg(short, long)]
    pub message: PathBuf,

    /// Attachment file (repeatable)
    #[arg(short, long = "attachment")]
    pub attachments: Vec<PathBuf>,

    /// Log the validated record instead of submitting it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Graph message JSON file
    #[arg(short, long)]
    pub message: PathBuf,
}

/// Arguments for the cargo command.
#[derive(Debug, Parser)]
pub struct CargoArgs {
    /// Cargo description, e.g. "3 pallets 120 x 80 x 100 cm, 450 kg"
    pub details: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
