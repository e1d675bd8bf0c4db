//! Process command implementation.

use super::read_message;
use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::provider::ConfiguredProvider;
use qtc_domain::RawDocument;
use qtc_extractor::SchemaExtractor;
use qtc_gatekeeper::Gatekeeper;
use qtc_pipeline::{LoggingSink, Notification, PipelineError, QuotePipeline};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    // Only the logging sink ships with this workspace
    if !args.dry_run {
        return Err(CliError::InvalidInput(
            "no automation sink is available in this build; rerun with --dry-run".to_string(),
        ));
    }

    let message = read_message(&args.message)?;
    let attachments = args
        .attachments
        .iter()
        .map(|path| read_attachment(path))
        .collect::<Result<Vec<_>>>()?;

    let provider = ConfiguredProvider::from_settings(&config.llm)?;
    let extractor = SchemaExtractor::new(provider, config.extractor_config())?;
    let gatekeeper = Gatekeeper::new(config.validation_config());
    let pipeline = QuotePipeline::new(extractor, gatekeeper, LoggingSink);

    let notification = Notification::new(message, attachments);
    info!("Processing {} as notification {}", args.message.display(), notification.id);

    match pipeline.process(notification).await {
        Ok(outcome) => {
            println!("{}", formatter.format_outcome(&outcome)?);
            Ok(())
        }
        Err(PipelineError::SchemaValidation(failure)) => {
            println!("{}", formatter.format_validation_failure(&failure)?);
            Err(PipelineError::SchemaValidation(failure).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn read_attachment(path: &Path) -> Result<RawDocument> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", path.display())))?;
    let content = fs::read(path)?;
    Ok(RawDocument::new(filename, content))
}
