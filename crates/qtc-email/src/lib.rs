//! QTC Email
//!
//! Decomposes an inbound message and recovers the quote's key/value table from
//! its HTML body.
//!
//! # Overview
//!
//! - [`parse_message`] reads a Microsoft Graph message JSON object into a
//!   [`ParsedEmail`]. Every field is read on its own; anything missing or of the
//!   wrong shape becomes its empty default. It never fails.
//! - [`parse_key_value_table`] picks the data table out of an HTML body and
//!   flattens its rows into a [`TableData`] mapping.
//! - [`extract_cargo_details`] pulls dimensions, package count and weight out of
//!   a free-text cargo description.
//!
//! # Table selection
//!
//! Two phases, kept separate on purpose:
//!
//! 1. The first table whose first four cells mention both "description" and
//!    "values" is taken immediately.
//! 2. Otherwise the table with the most rows wins; on a tie the earliest table
//!    is kept.
//!
//! No tables at all yields an empty mapping.
//!
//! # Example Usage
//!
//! ```
//! use qtc_email::parse_key_value_table;
//!
//! let html = "<table>\
//!     <tr><th>Description</th><th>Values</th></tr>\
//!     <tr><td>Commodity</td><td>Electronics</td></tr>\
//! </table>";
//! let data = parse_key_value_table(html);
//! assert_eq!(data.get("Commodity"), Some("Electronics"));
//! ```

#![warn(missing_docs)]

mod cargo;
mod error;
mod parser;
mod table;

pub use cargo::{extract_cargo_details, CargoDetails};
pub use error::EmailError;
pub use parser::parse_message;
pub use qtc_domain::{Mailbox, ParsedEmail, TableData};
pub use table::{clean_text, parse_key_value_table, try_parse_key_value_table};
