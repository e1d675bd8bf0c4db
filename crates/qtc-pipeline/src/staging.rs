//! Attachment staging: write to a private temporary directory, then route

use qtc_documents::route;
use qtc_domain::{DocumentKind, ExtractedDocument, RawDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const FALLBACK_NAME: &str = "attachment";

/// Write every attachment to disk and run it through the document router
///
/// Returns `(original file name, extracted document)` pairs in input order.
/// Blocking; run on the blocking pool. The staging directory is removed on
/// return, so image paths in the result no longer exist.
pub(crate) fn stage_and_route(attachments: Vec<RawDocument>) -> Vec<(String, ExtractedDocument)> {
    let dir = match tempfile::Builder::new().prefix("qtc-").tempdir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            warn!("Cannot create staging directory, attachments skipped: {}", e);
            None
        }
    };

    attachments
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            info!("Processing attachment: {}", raw.filename);
            let document = match &dir {
                Some(dir) => stage_one(dir.path(), index, &raw),
                None => degraded(&raw),
            };
            (raw.filename, document)
        })
        .collect()
}

fn stage_one(dir: &Path, index: usize, raw: &RawDocument) -> ExtractedDocument {
    let path = dir.join(staged_name(index, &raw.filename));
    match fs::write(&path, &raw.content) {
        Ok(()) => route(&path).unwrap_or(ExtractedDocument::Unknown),
        Err(e) => {
            warn!("Cannot stage attachment {}: {}", raw.filename, e);
            degraded(raw)
        }
    }
}

/// The empty document of the attachment's kind, as an extractor failure would produce
fn degraded(raw: &RawDocument) -> ExtractedDocument {
    match raw.kind() {
        DocumentKind::Spreadsheet => ExtractedDocument::Spreadsheet {
            text: String::new(),
            sheets: Vec::new(),
        },
        DocumentKind::Pdf => ExtractedDocument::Pdf { text: String::new() },
        DocumentKind::Word => ExtractedDocument::Word { text: String::new() },
        DocumentKind::Image => ExtractedDocument::Image {
            path: PathBuf::from(&raw.filename),
        },
        DocumentKind::Unknown => ExtractedDocument::Unknown,
    }
}

/// File name safe to join onto the staging directory
///
/// Keeps only the final path component, maps anything other than
/// alphanumerics, `.`, `-` and `_` to `_`, and prefixes the attachment index so
/// that duplicate names do not collide. The extension is preserved.
fn staged_name(index: usize, filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.is_empty() { FALLBACK_NAME } else { cleaned };
    format!("{:03}_{}", index, cleaned)
}
