//! Terminal output for the command line front end.
//!
//! Diagnostics go through `log`; this is the user-facing summary.

use console::{Term, style};
use std::io;

/// Styled terminal output honoring `--verbose` and `--quiet`.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager. `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
        }
    }

    /// Prints a detail line in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            Term::stdout().write_line(&style(message).dim().to_string())?;
        }
        Ok(())
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            Term::stdout().write_line(&format!("{} {}", style("→").cyan(), message))?;
        }
        Ok(())
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            Term::stdout().write_line(&format!("{} {}", style("✓").green(), message))?;
        }
        Ok(())
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            Term::stderr().write_line(&format!("{} {}", style("⚠").yellow(), message))?;
        }
        Ok(())
    }

    /// Prints an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            Term::stdout().write_line(&format!("  {message}"))?;
        }
        Ok(())
    }
}
