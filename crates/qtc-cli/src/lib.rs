//! QTC CLI library.
//!
//! Drives the quote extraction pipeline offline from saved Graph message JSON
//! and attachment files: configuration, command execution and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod provider;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
