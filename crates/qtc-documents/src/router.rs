//! Dispatch a file to the extractor for its kind

use crate::{pdf, spreadsheet, word};
use qtc_domain::{DocumentKind, ExtractedDocument};
use std::path::Path;
use tracing::{debug, warn};

/// Identify the kind of a file from its extension (case-insensitive)
pub fn identify(path: &Path) -> DocumentKind {
    DocumentKind::from_path(path)
}

/// Extract a file with the extractor matching its kind
///
/// Returns `None` only for an unrecognized extension. Images come back as a
/// path reference without text.
pub fn route(path: &Path) -> Option<ExtractedDocument> {
    let kind = identify(path);
    debug!("Routing {} as {}", path.display(), kind.as_str());

    match kind {
        DocumentKind::Spreadsheet => Some(spreadsheet::extract_spreadsheet(path)),
        DocumentKind::Pdf => Some(pdf::extract_pdf(path)),
        DocumentKind::Word => Some(word::extract_word(path)),
        DocumentKind::Image => Some(ExtractedDocument::Image {
            path: path.to_path_buf(),
        }),
        DocumentKind::Unknown => {
            warn!("Unsupported document type for file: {}", path.display());
            None
        }
    }
}
