//! Command implementations.

pub mod cargo;
pub mod inspect;
pub mod process;
pub mod schema;

pub use self::cargo::execute_cargo;
pub use self::inspect::execute_inspect;
pub use self::process::execute_process;
pub use self::schema::execute_schema;

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a saved Graph message.
pub(crate) fn read_message(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
