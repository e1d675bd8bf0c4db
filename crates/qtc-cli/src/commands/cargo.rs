//! Cargo command implementation.

use crate::cli::CargoArgs;
use crate::error::Result;
use crate::output::Formatter;
use qtc_email::extract_cargo_details;

/// Execute the cargo command.
pub fn execute_cargo(args: CargoArgs, formatter: &Formatter) -> Result<()> {
    let details = extract_cargo_details(&args.details);
    println!("{}", formatter.format_cargo(&details)?);
    Ok(())
}
