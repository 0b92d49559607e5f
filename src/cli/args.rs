//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation of
//! the combinations clap cannot express.

use crate::source::ApplicationSpec;
use clap::Parser;
use std::path::PathBuf;

/// Configuration bundle assembler for Mule applications
#[derive(Parser, Debug)]
#[command(
    name = "mule_bundler",
    version,
    about = "Merges the configuration files of several applications into one deployable bundle",
    long_about = "Merges the configuration files of several independently built applications into a
single output directory and writes a mule-deploy.properties manifest listing them.

Every file is renamed <application>.<file name> so that files of different applications
never collide.

Usage:
  mule_bundler --app test-app1=apps/test-app1 --app test-app2=target/test-app2.zip --output-dir target/mule-bundle
  mule_bundler --config bundle.toml --archive target/mule-bundle.zip

Exit code 0 = every listed resource and the manifest exist in the output directory."
)]
pub struct Args {
    /// Bundle descriptor (TOML) listing applications and output settings
    #[arg(short = 'c', long, value_name = "FILE", env = "MULE_BUNDLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Application to bundle, as NAME=PATH (directory or .zip package)
    ///
    /// Repeatable. Applications are merged in the order given, after those
    /// of the descriptor.
    #[arg(short = 'a', long = "app", value_name = "NAME=PATH", value_parser = ApplicationSpec::parse)]
    pub apps: Vec<ApplicationSpec>,

    /// Directory receiving the merged resources and the manifest
    #[arg(short = 'o', long, value_name = "DIR", env = "MULE_BUNDLER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Properties file whose other keys are copied into the manifest
    #[arg(long, value_name = "FILE")]
    pub manifest_template: Option<PathBuf>,

    /// Manifest file name [default: mule-deploy.properties]
    #[arg(long, value_name = "NAME")]
    pub manifest_file_name: Option<String>,

    /// Also pack the bundle into this zip file
    #[arg(long, value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Empty the output directory before assembling
    #[arg(long)]
    pub clean: bool,

    /// Print every merged resource
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.is_none() && self.apps.is_empty() {
            return Err("Provide applications with --app NAME=PATH or --config FILE".to_string());
        }

        if let Some(archive) = &self.archive {
            if !crate::bundler::archive::is_zip(archive) {
                return Err(format!(
                    "Archive path must end with .zip: {}",
                    archive.display()
                ));
            }
        }

        if let Some(name) = &self.manifest_file_name {
            if name.trim().is_empty() {
                return Err("Manifest file name cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
