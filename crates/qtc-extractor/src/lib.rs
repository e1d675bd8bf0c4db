//! QTC Extractor
//!
//! Turns one parsed email and its attachments into a candidate freight quote
//! record by way of an LLM.
//!
//! # Overview
//!
//! Two stages live here:
//!
//! 1. **Context assembly** ([`assemble`]): subject, key/value table and the
//!    text of every usable attachment are concatenated into one
//!    [`ExtractionContext`]. Attachments without text are skipped, never fatal.
//! 2. **Schema-constrained extraction** ([`SchemaExtractor`]): the context is
//!    embedded in a prompt together with the record's JSON Schema and a fixed
//!    rulebook, sent to the LLM, and the answer is parsed into untyped JSON.
//!
//! # Architecture
//!
//! ```text
//! ParsedEmail + attachments → assemble → ExtractionContext → LLM → serde_json::Value → Gatekeeper
//! ```
//!
//! The output is deliberately untyped: typing happens in the gatekeeper, after
//! validation.
//!
//! # Example Usage
//!
//! ```no_run
//! use qtc_extractor::{assemble, ExtractorConfig, SchemaExtractor};
//! use qtc_domain::ParsedEmail;
//! use qtc_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let email = ParsedEmail::default();
//! let context = assemble(&email, &[]);
//!
//! let extractor = SchemaExtractor::new(MockProvider::new("{}"), ExtractorConfig::default())?;
//! let candidate = extractor.extract(&context).await?;
//! println!("{}", candidate);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use config::ExtractorConfig;
pub use context::{assemble, AttachmentStatus, ExtractionContext};
pub use error::ExtractorError;
pub use extractor::SchemaExtractor;
pub use parser::{parse_ai_response, strip_code_fence};
pub use prompt::PromptBuilder;
