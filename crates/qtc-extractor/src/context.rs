//! Context assembly: one ordered text blob per notification

use qtc_domain::{DocumentKind, ExtractedDocument, ParsedEmail};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Closing delimiter of an attachment block
const ATTACHMENT_END: &str = "-----------------------------------";

/// What the assembler did with one attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    /// Text was added to the context
    Included,
    /// Unrecognized file type
    SkippedUnsupported,
    /// Images carry no text
    SkippedImage,
    /// Extraction produced no text
    SkippedEmpty,
}

impl AttachmentStatus {
    /// Decide how an extracted document contributes to the context
    pub fn of(document: &ExtractedDocument) -> Self {
        match document.kind() {
            DocumentKind::Unknown => AttachmentStatus::SkippedUnsupported,
            DocumentKind::Image => AttachmentStatus::SkippedImage,
            _ if document.has_text() => AttachmentStatus::Included,
            _ => AttachmentStatus::SkippedEmpty,
        }
    }

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentStatus::Included => "included",
            AttachmentStatus::SkippedUnsupported => "skipped: unsupported type",
            AttachmentStatus::SkippedImage => "skipped: image",
            AttachmentStatus::SkippedEmpty => "skipped: no text",
        }
    }
}

/// The only input the LLM sees: subject block, table block, attachment blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionContext {
    blocks: Vec<String>,
}

impl ExtractionContext {
    /// Blocks in order
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Number of attachment blocks
    pub fn attachment_count(&self) -> usize {
        self.blocks.len().saturating_sub(2)
    }

    /// The whole context as one string
    pub fn to_text(&self) -> String {
        self.blocks.concat()
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.blocks.iter().map(String::len).sum()
    }

    /// Whether the context is empty (never true for an assembled context)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ExtractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            f.write_str(block)?;
        }
        Ok(())
    }
}

/// Build the extraction context for one email and its attachments
///
/// Always emits the subject and table blocks; then one block per attachment
/// whose status is [`AttachmentStatus::Included`], in the given order.
pub fn assemble(email: &ParsedEmail, attachments: &[(String, ExtractedDocument)]) -> ExtractionContext {
    let table = serde_json::to_string_pretty(&email.table_data).unwrap_or_else(|_| "{}".to_string());

    let mut blocks = Vec::with_capacity(attachments.len() + 2);
    blocks.push(format!("Email Subject: {}\n\n", email.subject));
    blocks.push(format!("Email Body Table Data:\n{}\n\n", table));

    for (name, document) in attachments {
        let status = AttachmentStatus::of(document);
        match (status, document.text()) {
            (AttachmentStatus::Included, Some(text)) => {
                info!("Adding attachment to context: {}", name);
                blocks.push(format!("--- Attachment: {} ---\n{}\n{}\n\n", name, text, ATTACHMENT_END));
            }
            _ => debug!("Attachment {} {}", name, status.as_str()),
        }
    }

    let context = ExtractionContext { blocks };
    debug!(
        "Assembled context: {} chars, {} attachment block(s)",
        context.len(),
        context.attachment_count()
    );
    context
}
