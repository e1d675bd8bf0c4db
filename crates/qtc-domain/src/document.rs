//! Document kinds and the text extracted from attachments

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Kind of an attachment, decided purely by its file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `.xlsx`, `.xls`
    Spreadsheet,
    /// `.pdf`
    Pdf,
    /// `.docx`, `.doc`
    Word,
    /// `.jpg`, `.jpeg`, `.png`
    Image,
    /// Anything else
    Unknown,
}

impl DocumentKind {
    /// Map a file extension (without the dot, any case) to a kind
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" => DocumentKind::Spreadsheet,
            "pdf" => DocumentKind::Pdf,
            "docx" | "doc" => DocumentKind::Word,
            "jpg" | "jpeg" | "png" => DocumentKind::Image,
            _ => DocumentKind::Unknown,
        }
    }

    /// Identify a file by the extension of its path
    ///
    /// # Examples
    ///
    /// ```
    /// use qtc_domain::DocumentKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(DocumentKind::from_path(Path::new("Quote.XLSX")), DocumentKind::Spreadsheet);
    /// assert_eq!(DocumentKind::from_path(Path::new("notes.txt")), DocumentKind::Unknown);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentKind::Unknown)
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "word",
            DocumentKind::Image => "image",
            DocumentKind::Unknown => "unknown",
        }
    }
}

/// Text rendering of one worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetText {
    /// Worksheet name
    pub name: String,

    /// `Sheet: <name>` header line followed by the tabular rendering
    pub text: String,

    /// Number of data rows (header row excluded)
    pub row_count: usize,
}

/// Result of routing one attachment through its format extractor
///
/// Each variant carries exactly what its kind allows: images are only a path
/// reference and unknown documents carry nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExtractedDocument {
    /// Workbook text plus per-sheet renderings
    Spreadsheet {
        /// All sheets joined by a blank line
        text: String,
        /// Sheets in workbook order
        sheets: Vec<SheetText>,
    },

    /// PDF text
    Pdf {
        /// Extracted text
        text: String,
    },

    /// Word-processor text
    Word {
        /// Extracted text
        text: String,
    },

    /// Image attachment; passed through by reference only
    Image {
        /// Location of the image on disk
        path: PathBuf,
    },

    /// Unsupported document
    Unknown,
}

impl ExtractedDocument {
    /// The kind of this document
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedDocument::Spreadsheet { .. } => DocumentKind::Spreadsheet,
            ExtractedDocument::Pdf { .. } => DocumentKind::Pdf,
            ExtractedDocument::Word { .. } => DocumentKind::Word,
            ExtractedDocument::Image { .. } => DocumentKind::Image,
            ExtractedDocument::Unknown => DocumentKind::Unknown,
        }
    }

    /// Extracted text, if this kind carries text at all
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractedDocument::Spreadsheet { text, .. }
            | ExtractedDocument::Pdf { text }
            | ExtractedDocument::Word { text } => Some(text),
            ExtractedDocument::Image { .. } | ExtractedDocument::Unknown => None,
        }
    }

    /// Per-sheet renderings (empty for non-spreadsheets)
    pub fn sheets(&self) -> &[SheetText] {
        match self {
            ExtractedDocument::Spreadsheet { sheets, .. } => sheets,
            _ => &[],
        }
    }

    /// Whether there is any non-blank text to feed the extractor
    pub fn has_text(&self) -> bool {
        self.text().is_some_and(|t| !t.trim().is_empty())
    }
}

/// An attachment as delivered by the document source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// File name as sent by the mail system
    pub filename: String,

    /// Raw bytes
    pub content: Vec<u8>,
}

impl RawDocument {
    /// Create a new raw document
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Kind implied by the file name
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_path(Path::new(&self.filename))
    }
}
