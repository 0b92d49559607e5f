//! Builder for constructing Settings.

use super::{Application, Settings, core::DEFAULT_MANIFEST_FILE_NAME};
use crate::bundler::{
    error::{Context, Error, Result},
    resources::validate_application_name,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// `build()` checks that an output directory is set and that every application
/// name can serve as an output filename prefix.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    applications: Vec<Application>,
    output_dir: Option<PathBuf>,
    manifest_file_name: Option<String>,
    manifest_template: Option<PathBuf>,
    archive: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends one contributing application. Order is preserved.
    pub fn application(mut self, application: Application) -> Self {
        self.applications.push(application);
        self
    }

    /// Appends several contributing applications. Order is preserved.
    pub fn applications<I>(mut self, applications: I) -> Self
    where
        I: IntoIterator<Item = Application>,
    {
        self.applications.extend(applications);
        self
    }

    /// Sets the bundle output directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the manifest file name.
    ///
    /// Default: `mule-deploy.properties`
    pub fn manifest_file_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_file_name = Some(name.into());
        self
    }

    /// Sets a properties template whose keys are carried into the manifest.
    pub fn manifest_template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_template = Some(path.as_ref().to_path_buf());
        self
    }

    /// Packs the finished bundle into a zip at `path`.
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `output_dir` is missing
    /// - no application was added
    /// - an application name is rejected by [`validate_application_name`],
    ///   or is used twice
    /// - the manifest file name is empty or contains a path separator
    /// - the archive would be written inside the output directory
    pub fn build(self) -> Result<Settings> {
        let output_dir = self.output_dir.context("output_dir is required")?;

        if self.applications.is_empty() {
            return Err(Error::GenericError(
                "at least one application is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for app in &self.applications {
            validate_application_name(app.name())?;
            if !seen.insert(app.name()) {
                return Err(Error::configuration(
                    app.name(),
                    "application name is used more than once",
                ));
            }
        }

        let manifest_file_name = self
            .manifest_file_name
            .unwrap_or_else(|| DEFAULT_MANIFEST_FILE_NAME.to_string());
        if manifest_file_name.is_empty() || has_separator(&manifest_file_name) {
            return Err(Error::InvalidName(format!(
                "manifest file name `{manifest_file_name}` must be a plain file name"
            )));
        }

        if let Some(archive) = &self.archive {
            if archive.starts_with(&output_dir) {
                return Err(Error::GenericError(format!(
                    "bundle archive {} must not be inside the output directory {}",
                    archive.display(),
                    output_dir.display()
                )));
            }
        }

        Ok(Settings::new(
            self.applications,
            output_dir,
            manifest_file_name,
            self.manifest_template,
            self.archive,
        ))
    }
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || name.contains('\\')
}
