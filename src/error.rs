//! Error types for the command line front end.
//!
//! Library failures arrive as [`crate::bundler::Error`] and are wrapped here
//! together with argument, descriptor and report errors.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the binary
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            Self::Bundler(Error::Configuration { application, .. }) => vec![
                format!("Check the path given for application `{application}`"),
                "Application roots must be existing directories or .zip packages".to_string(),
            ],
            Self::Bundler(Error::Discovery { .. }) => vec![
                "Symbolic links and special files are not supported inside applications"
                    .to_string(),
            ],
            Self::Bundler(Error::Copy { .. } | Error::ManifestWrite { .. }) => vec![
                "Check that the output directory is writable".to_string(),
                "Assembly is idempotent; re-run it once the problem is fixed".to_string(),
            ],
            Self::Cli(CliError::MissingArgument { .. })
            | Self::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see the accepted arguments".to_string()]
            }
            Self::Toml(_) => vec!["Check the bundle descriptor syntax".to_string()],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_suggestion_names_application() {
        let err = BundlerError::from(crate::bundler::Error::Configuration {
            application: "test-app1".into(),
            reason: "missing".into(),
        });
        let suggestions = err.recovery_suggestions();
        assert!(suggestions[0].contains("test-app1"));
    }

    #[test]
    fn test_generic_suggestion() {
        let err = BundlerError::from(std::io::Error::other("boom"));
        assert_eq!(err.recovery_suggestions().len(), 1);
    }
}
