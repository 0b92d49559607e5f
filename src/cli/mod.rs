//! Command line interface for the bundle assembler.
//!
//! This module provides argument parsing, command execution and user
//! feedback on top of the [`bundler`](crate::bundler) library.

mod args;
pub mod commands;
mod output;
mod report;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;
pub use report::BundleReport;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    run_with(Args::parse_args())
}

/// Executes already parsed arguments
pub fn run_with(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    commands::assemble(&args, &config)
}
