//! Parse LLM output into untyped JSON

use crate::error::ExtractorError;
use serde_json::Value;
use tracing::error;

/// Remove a surrounding markdown code fence, if any
///
/// Handles a leading ```` ```json ```` or ```` ``` ```` and a trailing ```` ``` ````
/// independently; unfenced text is only trimmed.
///
/// # Examples
///
/// ```
/// use qtc_extractor::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse an LLM response into JSON
///
/// The value is not checked for shape here; that is the gatekeeper's job.
///
/// # Errors
///
/// [`ExtractorError::MalformedAiOutput`] carrying the raw response when the
/// text is not JSON. The raw text is logged at error level.
pub fn parse_ai_response(response: &str) -> Result<Value, ExtractorError> {
    serde_json::from_str(strip_code_fence(response)).map_err(|e| {
        error!("Failed to decode JSON from AI response: {}", e);
        error!("AI raw response: {}", response);
        ExtractorError::MalformedAiOutput {
            raw: response.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = parse_ai_response(r#"{"client_name": "ACME"}"#).unwrap();
        assert_eq!(value, json!({"client_name": "ACME"}));
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"product\": \"Ocean\"}\n```\n";
        assert_eq!(parse_ai_response(raw).unwrap(), json!({"product": "Ocean"}));
    }

    #[test]
    fn test_bare_fence() {
        let raw = "```\n[1, 2]\n```";
        assert_eq!(parse_ai_response(raw).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(parse_ai_response("```json {\"a\": true}").unwrap(), json!({"a": true}));
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        let raw = "Sure! Here is the data: {client_name: ACME}";
        match parse_ai_response(raw) {
            Err(ExtractorError::MalformedAiOutput { raw: kept, reason }) => {
                assert_eq!(kept, raw);
                assert!(!reason.is_empty());
            }
            other => panic!("Expected MalformedAiOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_is_malformed() {
        let err = parse_ai_response("   ").unwrap_err();
        assert_eq!(err.raw_output(), Some("   "));
    }
}
