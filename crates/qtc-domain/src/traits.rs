//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the extraction core and the
//! systems it feeds or consumes. Implementations live in other crates.

use crate::FreightQuoteRecord;

/// Text-to-JSON capability
///
/// Implemented by the infrastructure layer (qtc-llm). The core owns prompt
/// construction and response parsing; implementations only move text.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output, constrained by a JSON Schema (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Downstream automation that consumes validated records
///
/// Implemented by whatever fills the quote form. Returns a free-text outcome
/// that the core only logs.
pub trait AutomationSink {
    /// Error type for automation runs
    type Error;

    /// Hand over one validated record
    fn submit(&self, record: &FreightQuoteRecord) -> Result<String, Self::Error>;
}
