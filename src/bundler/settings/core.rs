//! Core Settings struct and implementations.

use super::Application;
use std::path::{Path, PathBuf};

/// File name the host runtime looks for when deploying a bundle.
pub const DEFAULT_MANIFEST_FILE_NAME: &str = "mule-deploy.properties";

/// Settings for one assembly run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use mule_bundler::bundler::{Application, SettingsBuilder};
///
/// # fn example() -> mule_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_dir("target/bundle-target/mule-bundle")
///     .application(Application::new("test-app1", "apps/test-app1"))
///     .application(Application::new("test-app2", "apps/test-app2"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Contributing applications, in bundle order.
    applications: Vec<Application>,

    /// Directory receiving the merged resources and the manifest.
    output_dir: PathBuf,

    /// Manifest file name inside `output_dir`.
    manifest_file_name: String,

    /// Properties file whose other keys are carried into the manifest.
    manifest_template: Option<PathBuf>,

    /// Zip file to pack the finished bundle into.
    archive: Option<PathBuf>,
}

impl Settings {
    /// Returns the contributing applications in bundle order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Returns the bundle output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the manifest file name.
    pub fn manifest_file_name(&self) -> &str {
        &self.manifest_file_name
    }

    /// Returns the full manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_file_name)
    }

    /// Returns the manifest template, if any.
    pub fn manifest_template(&self) -> Option<&Path> {
        self.manifest_template.as_deref()
    }

    /// Returns the bundle archive destination, if any.
    pub fn archive(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    pub(super) fn new(
        applications: Vec<Application>,
        output_dir: PathBuf,
        manifest_file_name: String,
        manifest_template: Option<PathBuf>,
        archive: Option<PathBuf>,
    ) -> Self {
        Self {
            applications,
            output_dir,
            manifest_file_name,
            manifest_template,
            archive,
        }
    }
}
