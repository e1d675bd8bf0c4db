//! Schema command implementation.

use crate::error::Result;
use qtc_domain::FreightQuoteRecord;

/// Execute the schema command.
pub fn execute_schema() -> Result<()> {
    println!("{}", FreightQuoteRecord::json_schema_pretty()?);
    Ok(())
}
