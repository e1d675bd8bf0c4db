//! QTC Domain Layer
//!
//! This crate contains the data model shared by every stage of the freight-quote
//! extraction pipeline, plus the trait interfaces for the collaborators the
//! pipeline talks to but does not own (the text-to-JSON capability and the
//! automation sink).
//!
//! ## Key Concepts
//!
//! - **ExtractedDocument**: plain text recovered from one attachment, tagged by kind
//! - **ParsedEmail**: sender, recipients, subject and the key/value table of the body
//! - **FreightQuoteRecord**: the validated structured record handed to automation
//! - **Mandatory**: a field that must be present, with an explicit "not found" value
//!   (`NOT_FOUND_HIL`) that routes the quote to a human
//!
//! ## Architecture
//!
//! - No I/O, no async
//! - Serialization and schema derivation only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod email;
pub mod mandatory;
pub mod notification;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use document::{DocumentKind, ExtractedDocument, RawDocument, SheetText};
pub use email::{Mailbox, ParsedEmail, TableData};
pub use mandatory::{Mandatory, HIL_SENTINEL};
pub use notification::NotificationId;
pub use record::{ContainerLine, FreightQuoteRecord, InquiryType, OceanType, Product};
