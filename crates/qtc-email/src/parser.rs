//! Microsoft Graph message decomposition

use crate::table::parse_key_value_table;
use qtc_domain::{Mailbox, ParsedEmail};
use serde_json::Value;
use tracing::{debug, info};

/// Decompose a Graph message object into a [`ParsedEmail`]
///
/// Reads `from.emailAddress`, `toRecipients`, `ccRecipients`, `subject` and
/// `body.content`. Each field is read independently; a missing or malformed
/// field falls back to its empty default without affecting the others.
///
/// # Examples
///
/// ```
/// use qtc_email::parse_message;
/// use serde_json::json;
///
/// let email = parse_message(&json!({
///     "from": {"emailAddress": {"name": "Ops", "address": "ops@example.com"}},
///     "subject": "RFQ Shanghai to Jebel Ali"
/// }));
/// assert_eq!(email.sender.email, "ops@example.com");
/// assert!(email.recipients.is_empty());
/// ```
pub fn parse_message(message: &Value) -> ParsedEmail {
    let sender = message
        .get("from")
        .map(mailbox)
        .unwrap_or_default();

    let recipients = mailboxes(message.get("toRecipients"));
    let cc_recipients = mailboxes(message.get("ccRecipients"));
    let subject = string_at(message, &["subject"]);

    let html = string_at(message, &["body", "content"]);
    let table_data = if html.is_empty() {
        Default::default()
    } else {
        info!("Parsing email body...");
        parse_key_value_table(&html)
    };

    debug!(
        "Parsed email: {} recipient(s), {} cc, {} table entries",
        recipients.len(),
        cc_recipients.len(),
        table_data.len()
    );

    ParsedEmail {
        sender,
        recipients,
        cc_recipients,
        subject,
        table_data,
    }
}

/// Read a `{"emailAddress": {"name", "address"}}` recipient object
fn mailbox(value: &Value) -> Mailbox {
    Mailbox {
        name: string_at(value, &["emailAddress", "name"]),
        email: string_at(value, &["emailAddress", "address"]),
    }
}

fn mailboxes(value: Option<&Value>) -> Vec<Mailbox> {
    value
        .and_then(Value::as_array)
        .map(|list| list.iter().map(mailbox).collect())
        .unwrap_or_default()
}

/// String at a nested path, empty when any step is missing or not a string
fn string_at(value: &Value, path: &[&str]) -> String {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
