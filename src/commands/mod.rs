//! Command implementations for destyle.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod convert;
mod scan;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => convert::cmd_convert(args),
        Command::Scan(args) => scan::cmd_scan(args),
    }
}
