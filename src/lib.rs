//! Configuration bundle assembler for Mule applications.
//!
//! Merges the configuration resources of several independently built
//! applications into one output directory and writes the
//! `mule-deploy.properties` manifest the runtime uses to load them in a
//! single deployment.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
