//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default model name recorded with extractions
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-pro";

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Call the provider's structured entry point with the schema
    pub use_structured_output: bool,

    /// Model name, for logs and outcomes
    pub model_name: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_name.trim().is_empty() {
            return Err("model_name must not be empty".to_string());
        }
        Ok(())
    }

    /// Plain preset: free-text generation, the prompt alone carries the schema
    pub fn plain() -> Self {
        Self {
            use_structured_output: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            use_structured_output: true,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}
