//! QTC Pipeline
//!
//! Processes one inbound email notification end to end:
//!
//! ```text
//! message JSON ─ parse ─┐
//!                        ├─ assemble ─ extract (LLM) ─ validate ─ AutomationSink
//! attachments ─ route ──┘
//! ```
//!
//! # Failure policy
//!
//! - Attachment problems (unsupported type, unreadable file) never abort; the
//!   attachment is skipped and reported in [`PipelineOutcome::attachments`].
//! - Extraction and validation failures abort this notification only. Nothing
//!   is retried and the sink is not called.
//!
//! # Concurrency
//!
//! [`QuotePipeline::process`] takes `&self` and keeps all intermediate data
//! local, so independent notifications can be processed concurrently from one
//! pipeline. Document parsing and the LLM call run on the blocking pool.
//!
//! # Example Usage
//!
//! ```no_run
//! use qtc_extractor::{ExtractorConfig, SchemaExtractor};
//! use qtc_gatekeeper::Gatekeeper;
//! use qtc_llm::MockProvider;
//! use qtc_pipeline::{LoggingSink, Notification, QuotePipeline};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = SchemaExtractor::new(MockProvider::new("{}"), ExtractorConfig::default())?;
//! let pipeline = QuotePipeline::new(extractor, Gatekeeper::default_config(), LoggingSink);
//!
//! let notification = Notification::new(json!({"subject": "RFQ"}), vec![]);
//! match pipeline.process(notification).await {
//!     Ok(outcome) => println!("Automation result: {}", outcome.automation_result),
//!     Err(e) => eprintln!("Notification failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod notification;
mod pipeline;
mod sink;
mod staging;

pub use error::PipelineError;
pub use notification::Notification;
pub use pipeline::{AttachmentReport, PipelineOutcome, QuotePipeline};
pub use sink::LoggingSink;
