//! Pipeline error types

use qtc_extractor::ExtractorError;
use qtc_gatekeeper::ValidationFailure;
use thiserror::Error;

/// Errors that abort processing of one notification
#[derive(Error, Debug)]
pub enum PipelineError {
    /// LLM call failed or returned non-JSON
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractorError),

    /// Candidate record rejected by the gatekeeper
    #[error("Schema validation failed: {0}")]
    SchemaValidation(#[from] ValidationFailure),

    /// The automation sink reported an error
    #[error("Automation failed: {0}")]
    Automation(String),

    /// A blocking task could not be joined
    #[error("Task join error: {0}")]
    Join(String),
}

impl PipelineError {
    /// Whether the failure was the AI answering with something other than JSON
    pub fn is_malformed_ai_output(&self) -> bool {
        matches!(
            self,
            PipelineError::Extraction(ExtractorError::MalformedAiOutput { .. })
        )
    }
}
