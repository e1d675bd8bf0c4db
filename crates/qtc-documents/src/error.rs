//! Error types for the format extractors

use thiserror::Error;

/// Errors raised inside a format extractor
///
/// These never escape the public extractor functions; they are logged and the
/// document degrades to empty text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or a sheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// PDF text extraction failed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Word file is not a valid OOXML package
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Word body XML is malformed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
