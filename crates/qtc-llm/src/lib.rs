//! QTC LLM Provider Layer
//!
//! Implementations of the text-to-JSON capability consumed by the extractor.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from `qtc-domain`.
//! Providers only move text: prompt construction and response parsing belong to
//! `qtc-extractor`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing and offline runs
//! - `GeminiProvider`: Google Generative Language API
//!
//! No provider retries a failed call.
//!
//! # Examples
//!
//! ```
//! use qtc_llm::MockProvider;
//! use qtc_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"client_name": "ACME"}"#);
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, r#"{"client_name": "ACME"}"#);
//! ```

#![warn(missing_docs)]

pub mod gemini;

use qtc_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key environment variable is unset or empty
    #[error("API key not set: environment variable {0} is empty")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Marker response that makes [`MockProvider`] fail
const MOCK_ERROR: &str = "ERROR";

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Every prompt and schema it receives is recorded so callers can inspect
/// what was sent.
///
/// # Examples
///
/// ```
/// use qtc_llm::MockProvider;
/// use qtc_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert_eq!(provider.generate("prompt2").unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// One recorded call to a [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Prompt text
    pub prompt: String,
    /// Schema, for structured calls
    pub schema: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MOCK_ERROR.to_string());
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Reset the recorded calls
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<MockCall> {
        lock(&self.calls).last().cloned()
    }

    fn respond(&self, prompt: &str, schema: Option<&str>) -> Result<String, LlmError> {
        lock(&self.calls).push(MockCall {
            prompt: prompt.to_string(),
            schema: schema.map(str::to_string),
        });

        match lock(&self.responses).get(prompt) {
            Some(response) if response == MOCK_ERROR => Err(LlmError::Other("Mock error".to_string())),
            Some(response) => Ok(response.clone()),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.respond(prompt, Some(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("prompt2", "{}").unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt");
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_provider_records_schema() {
        let provider = MockProvider::new("{}");
        provider.generate_structured("prompt", r#"{"type":"object"}"#).unwrap();

        let call = provider.last_call().unwrap();
        assert_eq!(call.prompt, "prompt");
        assert_eq!(call.schema.as_deref(), Some(r#"{"type":"object"}"#));

        provider.generate("plain").unwrap();
        assert_eq!(provider.last_call().unwrap().schema, None);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both share the same call log due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
