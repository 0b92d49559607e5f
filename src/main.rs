//! mule_bundler - merges application configuration files into one bundle.
//!
//! Reads the applications to bundle from the command line or a descriptor,
//! copies their configuration resources into the output directory and writes
//! the deployment manifest.

use mule_bundler::cli;
use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
