//! PDF text extraction

use crate::error::DocumentError;
use qtc_domain::ExtractedDocument;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text of a PDF, dropping blank lines
///
/// Any failure degrades to empty text.
pub fn extract_pdf(path: &Path) -> ExtractedDocument {
    let text = match read_pdf(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Error extracting text from PDF {}: {}", path.display(), e);
            String::new()
        }
    };
    debug!("Extracted {} chars from PDF {}", text.len(), path.display());
    ExtractedDocument::Pdf { text }
}

fn read_pdf(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path)?;

    // pdf-extract panics on some malformed inputs instead of returning an error
    let raw = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes)))
        .map_err(|_| DocumentError::Pdf("parser panicked".to_string()))?
        .map_err(|e| DocumentError::Pdf(e.to_string()))?;

    Ok(drop_blank_lines(&raw))
}

fn drop_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
