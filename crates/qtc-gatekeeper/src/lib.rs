//! QTC Gatekeeper
//!
//! Validates untrusted extractor output into a typed [`FreightQuoteRecord`].
//!
//! The Gatekeeper provides:
//! - Required-field checks (a missing key is an error, the `NOT_FOUND_HIL`
//!   sentinel is not)
//! - JSON type checks per field
//! - Enumeration membership for inquiry type, product and ocean type
//! - Container quantity checks
//! - Optionally, rejection of unknown keys and unknown Incoterms codes
//!
//! Every problem is collected before rejecting, so one failure report lists
//! all of them. A rejected candidate never reaches automation.
//!
//! # Examples
//!
//! ```
//! use qtc_gatekeeper::{Gatekeeper, ValidationConfig};
//! use serde_json::json;
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let result = gatekeeper.validate(&json!({"product": "Ocean"}));
//! assert!(result.is_err());
//! ```
//!
//! [`FreightQuoteRecord`]: qtc_domain::FreightQuoteRecord

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::{ValidationConfig, INCOTERMS};
pub use error::{FieldError, FieldErrorKind, ValidationFailure};
pub use validator::Gatekeeper;
