//! JSON run report.

use crate::bundler::{BundleEntry, BundleOutput, BundledArtifact};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of one assembly run, written with `--report`.
#[derive(Debug, Serialize)]
pub struct BundleReport<'a> {
    /// Bundle output directory
    pub output_dir: &'a Path,
    /// Manifest location
    pub manifest: &'a Path,
    /// Merged resources in manifest order
    pub resources: &'a [BundleEntry],
    /// Bundle archive, if packed
    pub artifact: Option<&'a BundledArtifact>,
}

impl<'a> BundleReport<'a> {
    /// Builds a report over a finished run.
    pub fn new(output_dir: &'a Path, output: &'a BundleOutput) -> Self {
        Self {
            output_dir,
            manifest: &output.manifest_path,
            resources: &output.entries,
            artifact: output.artifact.as_ref(),
        }
    }

    /// Writes the report as pretty JSON to `path`.
    pub fn write(&self, path: &Path) -> crate::error::Result<PathBuf> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("writing report {}", path.display()))?;
        Ok(path.to_path_buf())
    }
}
