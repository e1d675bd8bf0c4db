//! Inspect command implementation.

use super::read_message;
use crate::cli::InspectArgs;
use crate::error::Result;
use crate::output::Formatter;
use qtc_email::parse_message;

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, formatter: &Formatter) -> Result<()> {
    let message = read_message(&args.message)?;
    let email = parse_message(&message);
    println!("{}", formatter.format_email(&email)?);
    Ok(())
}
