//! Automation sinks shipped with the pipeline

use qtc_domain::traits::AutomationSink;
use qtc_domain::FreightQuoteRecord;
use std::convert::Infallible;
use tracing::info;

/// Sink that only logs the record it receives
///
/// Used for dry runs; form automation lives outside this workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl AutomationSink for LoggingSink {
    type Error = Infallible;

    fn submit(&self, record: &FreightQuoteRecord) -> Result<String, Self::Error> {
        let json = serde_json::to_string(record).unwrap_or_default();
        info!("Dry run, record not submitted: {}", json);
        Ok(format!("dry run: record for '{}' logged", record.client_name))
    }
}
