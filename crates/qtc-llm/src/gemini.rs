//! Gemini Provider Implementation
//!
//! Provides integration with the Google Generative Language API
//! (`models/{model}:generateContent`).
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint and model
//! - JSON response mode for structured generation
//! - Single attempt per call; callers own retry policy
//!
//! # Examples
//!
//! ```no_run
//! use qtc_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::from_env("GOOGLE_API_KEY", "gemini-2.5-pro").unwrap();
//!
//! // The inherent generate method is async; the LlmProvider trait offers a
//! // blocking wrapper for use off the async executor.
//! ```

use crate::LlmError;
use qtc_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Response from the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentRequest {
    fn new(prompt: &str, json_mode: bool) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: json_mode.then(|| GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, LlmError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse("Candidate has no text".to_string()));
        }
        Ok(text)
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://generativelanguage.googleapis.com")
    /// - `model`: Model to use (e.g., "gemini-2.5-pro")
    /// - `api_key`: API key sent with every request
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(DEFAULT_API_KEY_ENV.to_string()));
        }

        // Each blocking call runs on its own short-lived runtime, so pooled
        // connections must not outlive a call.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Create a provider on the default endpoint with the key read from `api_key_env`
    pub fn from_env(api_key_env: &str, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::from_env_with_endpoint(api_key_env, DEFAULT_ENDPOINT, model)
    }

    /// Create a provider on `endpoint` with the key read from `api_key_env`
    pub fn from_env_with_endpoint(
        api_key_env: &str,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(api_key_env).unwrap_or_default();
        Self::new(endpoint, model, api_key).map_err(|e| match e {
            LlmError::MissingApiKey(_) => LlmError::MissingApiKey(api_key_env.to_string()),
            other => other,
        })
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Generate text using the Gemini API
    ///
    /// With `json_mode` the model is asked to answer with `application/json`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network communication fails
    /// - The model does not exist
    /// - The quota is exhausted
    /// - The response carries no candidate text
    pub async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        info!("Sending prompt to Gemini ({})...", self.model);
        debug!("Prompt is {} chars, json_mode={}", prompt.len(), json_mode);

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::new(prompt, json_mode))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = body.into_text()?;
        info!("Received {} chars from Gemini", text.len());
        Ok(text)
    }
}

/// Drive a future to completion from synchronous code
///
/// Runs on a scoped thread with its own runtime so it is safe to call whether
/// or not the caller is inside a tokio context.
fn block_on<F>(future: F) -> Result<String, LlmError>
where
    F: Future<Output = Result<String, LlmError>> + Send,
{
    std::thread::scope(|scope| {
        scope
            .spawn(|| {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
                runtime.block_on(future)
            })
            .join()
            .unwrap_or_else(|_| Err(LlmError::Other("LLM worker thread panicked".to_string())))
    })
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(GeminiProvider::generate(self, prompt, false))
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        // The schema is already embedded in the prompt; JSON mode constrains the shape.
        block_on(GeminiProvider::generate(self, prompt, true))
    }
}
