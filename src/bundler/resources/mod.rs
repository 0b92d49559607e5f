//! Configuration resources and their place in the bundle.
//!
//! - [`discovery`] walks an application tree and yields [`ConfigResource`]s
//! - [`naming`] turns a resource into its bundle-unique output filename

pub mod discovery;
pub mod naming;

use super::settings::Application;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use discovery::{Resources, discover};
pub use naming::{last_path_segment, output_filename, validate_application_name};

/// One configuration file found inside an application tree.
#[derive(Debug, Clone)]
pub struct ConfigResource<'a> {
    application: &'a Application,
    relative_path: String,
    absolute_path: PathBuf,
}

impl<'a> ConfigResource<'a> {
    pub(crate) fn new(
        application: &'a Application,
        relative_path: String,
        absolute_path: PathBuf,
    ) -> Self {
        Self {
            application,
            relative_path,
            absolute_path,
        }
    }

    /// Returns the owning application.
    pub fn application(&self) -> &'a Application {
        self.application
    }

    /// Returns the path relative to the application root, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Returns the resolvable source location.
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Computes the output filename of this resource.
    pub fn output_filename(&self) -> super::Result<String> {
        output_filename(self.application.name(), &self.relative_path)
    }
}

/// A resource as merged into the bundle.
///
/// The list of entries returned by an assembly run is exactly what the
/// manifest enumerates. Holds an owned copy of its [`ConfigResource`]'s
/// fields so entries outlive the applications they were discovered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
    /// File name inside the bundle output directory
    pub output_filename: String,
    /// Name of the contributing application
    pub application: String,
    /// Path of the source file relative to the application root
    pub relative_path: String,
    /// Location the bytes were copied from
    pub source_path: PathBuf,
}

impl BundleEntry {
    pub(crate) fn from_resource(resource: &ConfigResource<'_>, output_filename: String) -> Self {
        Self {
            output_filename,
            application: resource.application().name().to_string(),
            relative_path: resource.relative_path().to_string(),
            source_path: resource.absolute_path().to_path_buf(),
        }
    }
}
