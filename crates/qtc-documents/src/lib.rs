//! QTC Documents
//!
//! Turns attachment files into plain text for the extraction context.
//!
//! # Overview
//!
//! Each supported document kind has one format extractor:
//!
//! | Kind | Extensions | Reader |
//! |------|------------|--------|
//! | Spreadsheet | `.xlsx`, `.xls` | calamine, every sheet rendered as an aligned table |
//! | PDF | `.pdf` | pdf-extract |
//! | Word | `.docx`, `.doc` | OOXML body walked in document order |
//! | Image | `.jpg`, `.jpeg`, `.png` | passed through by path |
//!
//! The [`route`] function dispatches on the closed [`DocumentKind`] enum, so adding
//! a kind is a compile-time checked change.
//!
//! # Failure policy
//!
//! Extractors never fail past their own boundary. A file that cannot be read
//! degrades to an empty-text document of its kind and a warning is logged, so
//! the pipeline continues with partial context. Only an unrecognized extension
//! yields `None`.
//!
//! # Example Usage
//!
//! ```no_run
//! use qtc_documents::route;
//! use std::path::Path;
//!
//! if let Some(doc) = route(Path::new("/tmp/rates.xlsx")) {
//!     println!("{}: {:?}", doc.kind().as_str(), doc.text());
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod pdf;
mod router;
mod spreadsheet;
mod word;

pub use error::DocumentError;
pub use pdf::extract_pdf;
pub use qtc_domain::{DocumentKind, ExtractedDocument, SheetText};
pub use router::{identify, route};
pub use spreadsheet::{extract_spreadsheet, render_rows};
pub use word::extract_word;
