//! Contributing application definition.

use std::path::{Path, PathBuf};

/// A named unit whose configuration files are merged into the bundle.
///
/// Read-only for the duration of an assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    name: String,
    root: PathBuf,
}

impl Application {
    /// Creates an application rooted at `root`.
    ///
    /// The name is typically the artifact or module name and becomes the
    /// prefix of every output filename the application contributes.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Returns the application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the application root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
