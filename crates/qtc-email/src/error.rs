//! Error types for email parsing

use thiserror::Error;

/// Errors raised while matching the HTML table
///
/// Callers of [`crate::parse_key_value_table`] never see these; the mapping
/// comes back empty instead.
#[derive(Error, Debug)]
pub enum EmailError {
    /// A CSS selector failed to compile
    #[error("Invalid selector '{selector}': {reason}")]
    Selector {
        /// The selector source
        selector: &'static str,
        /// Parser message
        reason: String,
    },

    /// A cargo-detail pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
