//! Per-notification orchestration

use crate::error::PipelineError;
use crate::notification::Notification;
use crate::staging::stage_and_route;
use qtc_domain::traits::{AutomationSink, LlmProvider};
use qtc_domain::{DocumentKind, FreightQuoteRecord, NotificationId};
use qtc_email::parse_message;
use qtc_extractor::{assemble, AttachmentStatus, SchemaExtractor};
use qtc_gatekeeper::Gatekeeper;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument, Span};

/// What happened to one attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentReport {
    /// File name as delivered
    pub filename: String,

    /// Kind decided by the router
    pub kind: DocumentKind,

    /// Whether its text reached the context
    pub status: AttachmentStatus,

    /// Extracted text length in characters
    pub chars: usize,

    /// Worksheets read (spreadsheets only)
    pub sheets: usize,
}

/// Result of a notification that reached automation
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Correlation id
    pub notification_id: NotificationId,

    /// The validated record handed to the sink
    pub record: FreightQuoteRecord,

    /// Mandatory fields carrying the `NOT_FOUND_HIL` sentinel
    pub needs_review: Vec<&'static str>,

    /// Free-text result returned by the sink
    pub automation_result: String,

    /// Per-attachment handling, in delivery order
    pub attachments: Vec<AttachmentReport>,
}

/// Runs notifications through parse, assemble, extract, validate and automation
pub struct QuotePipeline<L, A>
where
    L: LlmProvider,
    A: AutomationSink,
{
    extractor: SchemaExtractor<L>,
    gatekeeper: Gatekeeper,
    sink: Arc<A>,
}

impl<L, A> QuotePipeline<L, A>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
    A: AutomationSink + Send + Sync + 'static,
    A::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(extractor: SchemaExtractor<L>, gatekeeper: Gatekeeper, sink: A) -> Self {
        Self {
            extractor,
            gatekeeper,
            sink: Arc::new(sink),
        }
    }

    /// Process one notification
    ///
    /// Stages are strictly sequential within a notification. Returns an error
    /// without calling the sink when extraction or validation fails.
    pub async fn process(&self, notification: Notification) -> Result<PipelineOutcome, PipelineError> {
        let span = info_span!(
            "notification",
            id = %notification.id,
            received_at = notification.id.received_at_millis()
        );

        async move {
            info!("[JOB_START] Processing notification");
            let result = self.run(notification).await;
            match &result {
                Ok(outcome) => info!(
                    "[JOB_END] Finished, {} attachment(s), review needed for {:?}",
                    outcome.attachments.len(),
                    outcome.needs_review
                ),
                Err(e) => error!("[JOB_END] Notification failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, notification: Notification) -> Result<PipelineOutcome, PipelineError> {
        let Notification {
            id,
            message,
            attachments,
        } = notification;

        let email = parse_message(&message);

        info!("Fetching {} attachment(s)...", attachments.len());
        let span = Span::current();
        let routed = tokio::task::spawn_blocking(move || span.in_scope(|| stage_and_route(attachments)))
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))?;

        let reports: Vec<AttachmentReport> = routed
            .iter()
            .map(|(filename, document)| AttachmentReport {
                filename: filename.clone(),
                kind: document.kind(),
                status: AttachmentStatus::of(document),
                chars: document.text().map_or(0, |t| t.chars().count()),
                sheets: document.sheets().len(),
            })
            .collect();

        let context = assemble(&email, &routed);
        let candidate = self.extractor.extract(&context).await?;
        let record = self.gatekeeper.validate(&candidate)?;

        let automation_result = self.submit(&record).await?;

        Ok(PipelineOutcome {
            notification_id: id,
            needs_review: record.fields_needing_review(),
            record,
            automation_result,
            attachments: reports,
        })
    }

    async fn submit(&self, record: &FreightQuoteRecord) -> Result<String, PipelineError> {
        info!("[AUTOMATION_START] Running for: {}", record.client_name);

        let sink = Arc::clone(&self.sink);
        let record = record.clone();
        let span = Span::current();
        let result = tokio::task::spawn_blocking(move || span.in_scope(|| sink.submit(&record).map_err(|e| e.to_string())))
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))?
            .map_err(PipelineError::Automation)?;

        info!("[AUTOMATION_END] Complete. Result: {}", result);
        Ok(result)
    }
}
