//! Bundle descriptor loading.
//!
//! A descriptor (conventionally `bundle.toml`) lists the applications to merge
//! and where the bundle goes:
//!
//! ```toml
//! output_dir = "target/bundle-target/mule-bundle"
//! manifest_template = "src/main/app/mule-deploy.properties"
//! archive = "target/mule-bundle.zip"
//!
//! [[application]]
//! name = "test-app1"
//! path = "apps/test-app1"
//!
//! [[application]]
//! name = "test-app2"
//! path = "target/test-app2.zip"
//! ```
//!
//! Relative paths are resolved against the descriptor's directory.

use crate::error::{BundlerError, CliError, Result};
use crate::source::ApplicationSpec;
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw descriptor contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleDescriptor {
    /// Bundle output directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Manifest file name inside the output directory
    #[serde(default)]
    pub manifest_file_name: Option<String>,

    /// Properties template carried into the manifest
    #[serde(default)]
    pub manifest_template: Option<PathBuf>,

    /// Zip archive to pack the bundle into
    #[serde(default)]
    pub archive: Option<PathBuf>,

    /// Contributing applications, in bundle order
    #[serde(default, rename = "application")]
    pub applications: Vec<ApplicationEntry>,
}

/// One `[[application]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationEntry {
    /// Application name, used as the output filename prefix
    pub name: String,
    /// Application directory or zip package
    pub path: PathBuf,
}

impl BundleDescriptor {
    /// Converts the application tables into [`ApplicationSpec`]s.
    pub fn application_specs(&self) -> Vec<ApplicationSpec> {
        self.applications
            .iter()
            .map(|entry| ApplicationSpec::new(entry.name.clone(), entry.path.clone()))
            .collect()
    }
}

/// Loads the descriptor at `path`, resolving relative paths against its
/// directory.
pub fn load_descriptor(path: &Path) -> Result<BundleDescriptor> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_bundle_descriptor".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let mut descriptor: BundleDescriptor = toml::from_str(&text)?;

    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .absolutize()?
        .into_owned();

    descriptor.output_dir = descriptor
        .output_dir
        .map(|p| resolve_against(&base, &p))
        .transpose()?;
    descriptor.manifest_template = descriptor
        .manifest_template
        .map(|p| resolve_against(&base, &p))
        .transpose()?;
    descriptor.archive = descriptor
        .archive
        .map(|p| resolve_against(&base, &p))
        .transpose()?;
    for entry in &mut descriptor.applications {
        entry.path = resolve_against(&base, &entry.path)?;
    }

    log::debug!(
        "Loaded bundle descriptor {} with {} application(s)",
        path.display(),
        descriptor.applications.len()
    );
    Ok(descriptor)
}

fn resolve_against(base: &Path, path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize_from(base)?.into_owned())
}
