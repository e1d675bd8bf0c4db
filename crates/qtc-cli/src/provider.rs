//! Provider selection from configuration.

use crate::config::{LlmSettings, ProviderKind};
use crate::error::Result;
use qtc_domain::traits::LlmProvider;
use qtc_llm::{GeminiProvider, LlmError, MockProvider};
use std::fs;
use tracing::info;

/// Response used by the mock provider when no response file is configured
const EMPTY_RESPONSE: &str = "{}";

/// The provider named in `[llm]`
pub enum ConfiguredProvider {
    /// Gemini over HTTP
    Gemini(GeminiProvider),
    /// Canned response
    Mock(MockProvider),
}

impl ConfiguredProvider {
    /// Build the provider described by `settings`.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        match settings.provider {
            ProviderKind::Gemini => {
                let provider = GeminiProvider::from_env_with_endpoint(
                    &settings.api_key_env,
                    settings.endpoint.as_str(),
                    settings.model.as_str(),
                )?;
                info!("Using Gemini model {}", provider.model());
                Ok(Self::Gemini(provider))
            }
            ProviderKind::Mock => {
                let response = match &settings.mock_response {
                    Some(path) => fs::read_to_string(path)?,
                    None => EMPTY_RESPONSE.to_string(),
                };
                info!("Using mock provider ({} byte response)", response.len());
                Ok(Self::Mock(MockProvider::new(response)))
            }
        }
    }
}

impl LlmProvider for ConfiguredProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Self::Gemini(provider) => LlmProvider::generate(provider, prompt),
            Self::Mock(provider) => LlmProvider::generate(provider, prompt),
        }
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Self::Gemini(provider) => LlmProvider::generate_structured(provider, prompt, schema),
            Self::Mock(provider) => LlmProvider::generate_structured(provider, prompt, schema),
        }
    }
}
