//! Error types for bundle assembly.
//!
//! Every failure aborts the run. Variants carry the application name and the
//! offending path so the invoker can tell which contributor broke the bundle.

use std::{fmt::Display, io, path::Path, path::PathBuf};
use thiserror::Error;

/// Result alias for assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling a bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Missing or invalid application root, or an unusable setting.
    #[error("configuration error for application `{application}`: {reason}")]
    Configuration {
        /// Application the error is attributed to
        application: String,
        /// What is wrong with it
        reason: String,
    },

    /// I/O failure while walking an application tree.
    #[error("failed to discover resources of `{application}` at {}: {source}", path.display())]
    Discovery {
        /// Application being walked
        application: String,
        /// Entry that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// I/O failure while copying a resource into the bundle.
    #[error("failed to copy resource of `{application}` to {}: {source}", path.display())]
    Copy {
        /// Application owning the resource
        application: String,
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// I/O failure while writing the deployment descriptor.
    #[error("failed to write deployment manifest {}: {source}", path.display())]
    ManifestWrite {
        /// Manifest destination
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Application or resource name that cannot form an output filename.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Zip archive read/write failure.
    #[error("archive error for {}: {source}", path.display())]
    Archive {
        /// Archive path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: zip::result::ZipError,
    },

    /// File system failure with a description of the attempted action.
    #[error("error {context} {}: {error}", path.display())]
    Fs {
        /// Action that failed, e.g. "creating output directory"
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// Plain I/O error without extra context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Anything else, usually raised through [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),
}

/// Attach a message to an `Option` or a `Result`, turning it into [`Error`].
pub trait Context<T> {
    /// Convert into a [`Result`] using `msg` as the error text.
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Attach file system context to an I/O result.
pub trait ErrorExt<T> {
    /// Wrap the error into [`Error::Fs`] with the action and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for io::Result<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

impl Error {
    /// Name of the application the error is attributed to, if any.
    pub fn application(&self) -> Option<&str> {
        match self {
            Self::Configuration { application, .. }
            | Self::Discovery { application, .. }
            | Self::Copy { application, .. } => Some(application),
            _ => None,
        }
    }

    pub(crate) fn configuration(application: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            application: application.to_string(),
            reason: reason.into(),
        }
    }
}
