//! Core SchemaExtractor implementation

use crate::config::ExtractorConfig;
use crate::context::ExtractionContext;
use crate::error::ExtractorError;
use crate::parser::parse_ai_response;
use crate::prompt::PromptBuilder;
use qtc_domain::traits::LlmProvider;
use qtc_domain::FreightQuoteRecord;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, Span};

/// Sends an extraction context to the LLM and returns the candidate record as JSON
pub struct SchemaExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    schema: Arc<str>,
}

impl<L> SchemaExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new extractor targeting the [`FreightQuoteRecord`] schema
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let schema = FreightQuoteRecord::json_schema_pretty()
            .map_err(|e| ExtractorError::Schema(e.to_string()))?;
        Self::with_schema(llm_provider, config, schema)
    }

    /// Create a new extractor with an explicit schema
    pub fn with_schema(
        llm_provider: L,
        config: ExtractorConfig,
        schema: impl Into<String>,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            config,
            schema: Arc::from(schema.into()),
        })
    }

    /// The schema embedded in every prompt
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The prompt that would be sent for `context`
    pub fn prompt_for(&self, context: &ExtractionContext) -> String {
        PromptBuilder::new(&context.to_text(), &self.schema).build()
    }

    /// Extract a candidate record from one context
    ///
    /// Single attempt: a provider failure or non-JSON answer is returned as is.
    pub async fn extract(&self, context: &ExtractionContext) -> Result<Value, ExtractorError> {
        let prompt = self.prompt_for(context);
        info!(
            "Sending full context for extraction ({} chars, model {})",
            context.len(),
            self.config.model_name
        );
        debug!("Prompt length: {} chars", prompt.len());

        let response = self.call_llm(prompt).await?;
        debug!("LLM response length: {} chars", response.len());

        let candidate = parse_ai_response(&response)?;
        info!("Received structured JSON from the LLM");
        Ok(candidate)
    }

    /// Call the LLM provider
    async fn call_llm(&self, prompt: String) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.llm_provider);
        let schema = Arc::clone(&self.schema);
        let structured = self.config.use_structured_output;

        let span = Span::current();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let result = if structured {
                llm.generate_structured(&prompt, &schema)
            } else {
                llm.generate(&prompt)
            };
            result.map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}
