//! Application source resolution.
//!
//! An application is given either as a directory tree or as a zip package.
//! Packages are unpacked into a staging directory that lives as long as the
//! [`Staging`] value, so the assembler only ever sees directory roots.

use crate::bundler::{Application, Error, archive, resources::validate_application_name};
use std::collections::HashSet;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where an application's files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationSource {
    /// Unpacked application tree
    Directory(PathBuf),
    /// Zip application package
    Package(PathBuf),
}

impl ApplicationSource {
    /// Classifies `path` by its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if archive::is_zip(&path) {
            Self::Package(path)
        } else {
            Self::Directory(path)
        }
    }

    /// Returns the path as given.
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Package(path) => path,
        }
    }
}

/// A named application source, as listed on the command line or in a
/// bundle descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSpec {
    /// Application name
    pub name: String,
    /// Application contents
    pub source: ApplicationSource,
}

impl ApplicationSpec {
    /// Creates a spec, classifying `path` as a directory or a package.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: ApplicationSource::from_path(path),
        }
    }

    /// Parses a `NAME=PATH` argument.
    pub fn parse(value: &str) -> std::result::Result<Self, String> {
        let (name, path) = value
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got `{value}`"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing application name in `{value}`"));
        }
        validate_application_name(name).map_err(|e| e.to_string())?;
        if path.is_empty() {
            return Err(format!("missing application path in `{value}`"));
        }
        Ok(Self::new(name, path))
    }
}

/// Staging area for unpacked application packages.
///
/// Removed when dropped.
#[derive(Debug)]
pub struct Staging {
    dir: Option<TempDir>,
}

impl Staging {
    /// Creates an empty staging area; no directory is made until a package
    /// needs unpacking.
    pub fn new() -> Self {
        Self { dir: None }
    }

    fn root(&mut self) -> Result<&Path> {
        let dir = match self.dir.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("mule-bundler-")
                    .tempdir()?;
                log::debug!("Staging application packages in {}", dir.path().display());
                dir
            }
        };
        Ok(self.dir.insert(dir).path())
    }

    /// Resolves every spec to an [`Application`] with a directory root,
    /// unpacking packages as needed. Order is preserved.
    ///
    /// Every name is checked before any package is unpacked, since a name
    /// becomes a directory below the staging root.
    pub fn resolve(&mut self, specs: &[ApplicationSpec]) -> Result<Vec<Application>> {
        let mut names = HashSet::with_capacity(specs.len());
        for spec in specs {
            validate_application_name(&spec.name)?;
            if !names.insert(spec.name.as_str()) {
                return Err(Error::Configuration {
                    application: spec.name.clone(),
                    reason: "application name is used more than once".to_string(),
                }
                .into());
            }
        }

        let mut applications = Vec::with_capacity(specs.len());
        for spec in specs {
            let root = match &spec.source {
                ApplicationSource::Directory(path) => path.clone(),
                ApplicationSource::Package(package) => {
                    if !package.is_file() {
                        return Err(Error::Configuration {
                            application: spec.name.clone(),
                            reason: format!(
                                "application package {} does not exist",
                                package.display()
                            ),
                        }
                        .into());
                    }
                    let destination = self.root()?.join(&spec.name);
                    archive::extract_application(package, &destination)?;
                    log::info!("Unpacked {} from {}", spec.name, package.display());
                    destination
                }
            };
            applications.push(Application::new(spec.name.clone(), root));
        }
        Ok(applications)
    }
}

impl Default for Staging {
    fn default() -> Self {
        Self::new()
    }
}
