//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Every variant is fatal for the notification being processed.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The LLM answered with something that is not JSON
    #[error("Malformed AI output: {reason}")]
    MalformedAiOutput {
        /// The unmodified response text
        raw: String,
        /// Parser message
        reason: String,
    },

    /// The record schema could not be produced
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Raw LLM text, when the failure carries it
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ExtractorError::MalformedAiOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
