//! Main bundler orchestration and coordination.
//!
//! An assembly run moves through [`AssemblyPhase::Discovering`],
//! [`AssemblyPhase::Copying`] and [`AssemblyPhase::Manifesting`] once each.
//! Any error ends the run in [`AssemblyPhase::Failed`]; files already copied
//! stay where they are.

use std::{
    collections::{HashMap, HashSet, hash_map},
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::checksum::calculate_sha256;
use crate::bundler::{
    Application, DEFAULT_MANIFEST_FILE_NAME, Error, Result, Settings, archive,
    error::ErrorExt,
    manifest,
    resources::{self, BundleEntry, ConfigResource},
    utils::fs,
};

/// Phases of one assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    /// Walking application trees and resolving output names.
    Discovering,
    /// Writing resources into the output directory.
    Copying,
    /// Writing the deployment manifest (and the optional archive).
    Manifesting,
    /// The run completed.
    Done,
    /// The run stopped on an error.
    Failed,
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discovering => "discovering",
            Self::Copying => "copying",
            Self::Manifesting => "manifesting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Zip archive of a finished bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledArtifact {
    /// Archive location
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
}

/// Result of a complete [`Bundler::bundle`] run.
#[derive(Debug, Clone, Serialize)]
pub struct BundleOutput {
    /// Merged resources in manifest order
    pub entries: Vec<BundleEntry>,
    /// Written deployment manifest
    pub manifest_path: PathBuf,
    /// Bundle archive, when one was requested
    pub artifact: Option<BundledArtifact>,
}

/// Main bundler orchestrator.
///
/// Owns the output directory for the duration of a run. Runs are strictly
/// sequential; the caller must not point two runs at the same directory.
#[derive(Debug, Clone)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Discovers and copies every resource, returning the merged entries.
    ///
    /// Does not write the manifest; see [`Bundler::bundle`].
    pub fn assemble(&self) -> Result<Vec<BundleEntry>> {
        let mut run = Run::new(
            self.settings.output_dir(),
            self.settings.manifest_file_name(),
        );
        run.guard(|run| run.merge(self.settings.applications()))
    }

    /// Runs the full assembly: merge, manifest, optional archive.
    pub fn bundle(&self) -> Result<BundleOutput> {
        let mut run = Run::new(
            self.settings.output_dir(),
            self.settings.manifest_file_name(),
        );
        run.guard(|run| {
            let entries = run.merge(self.settings.applications())?;

            run.enter(AssemblyPhase::Manifesting);
            let manifest_path = manifest::write_manifest(
                &self.settings.manifest_path(),
                &entries,
                self.settings.manifest_template(),
            )?;

            let artifact = match self.settings.archive() {
                Some(archive_path) => Some(self.pack(archive_path, &entries)?),
                None => None,
            };

            Ok(BundleOutput {
                entries,
                manifest_path,
                artifact,
            })
        })
    }

    fn pack(&self, archive_path: &Path, entries: &[BundleEntry]) -> Result<BundledArtifact> {
        let mut files: Vec<&str> = entries
            .iter()
            .map(|entry| entry.output_filename.as_str())
            .collect();
        files.push(self.settings.manifest_file_name());

        archive::pack_bundle(self.settings.output_dir(), &files, archive_path)?;

        let size = std::fs::metadata(archive_path)
            .fs_context("reading artifact metadata", archive_path)?
            .len();
        let checksum = calculate_sha256(archive_path)?;

        log::info!(
            "Packed bundle into {} ({} bytes, sha256 {})",
            archive_path.display(),
            size,
            checksum
        );

        Ok(BundledArtifact {
            path: archive_path.to_path_buf(),
            size,
            checksum,
        })
    }
}

/// Merges `applications` into `output_dir` with the default manifest name
/// reserved, returning the entries in production order.
///
/// The manifest itself is not written; see [`manifest::write_manifest`].
pub fn assemble(applications: &[Application], output_dir: &Path) -> Result<Vec<BundleEntry>> {
    let mut run = Run::new(output_dir, DEFAULT_MANIFEST_FILE_NAME);
    run.guard(|run| run.merge(applications))
}

/// State of one in-flight assembly.
struct Run<'a> {
    phase: AssemblyPhase,
    output_dir: &'a Path,
    manifest_file_name: &'a str,
}

impl<'a> Run<'a> {
    fn new(output_dir: &'a Path, manifest_file_name: &'a str) -> Self {
        Self {
            phase: AssemblyPhase::Discovering,
            output_dir,
            manifest_file_name,
        }
    }

    fn enter(&mut self, next: AssemblyPhase) {
        log::debug!("Assembly phase: {} -> {}", self.phase, next);
        self.phase = next;
    }

    fn guard<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        match body(self) {
            Ok(value) => {
                self.enter(AssemblyPhase::Done);
                Ok(value)
            }
            Err(err) => {
                log::error!("Assembly failed while {}: {}", self.phase, err);
                self.enter(AssemblyPhase::Failed);
                Err(err)
            }
        }
    }

    fn merge(&mut self, applications: &[Application]) -> Result<Vec<BundleEntry>> {
        self.enter(AssemblyPhase::Discovering);
        let plan = self.plan(applications)?;

        self.enter(AssemblyPhase::Copying);
        fs::create_dir_all(self.output_dir, false)?;

        let mut entries = Vec::with_capacity(plan.len());
        for (resource, output_filename) in plan {
            let destination = self.output_dir.join(&output_filename);
            let bytes = fs::copy_file(resource.absolute_path(), &destination).map_err(|source| {
                Error::Copy {
                    application: resource.application().name().to_string(),
                    path: destination.clone(),
                    source,
                }
            })?;
            log::debug!(
                "Copied {}:{} -> {} ({} bytes)",
                resource.application().name(),
                resource.relative_path(),
                output_filename,
                bytes
            );
            entries.push(BundleEntry::from_resource(&resource, output_filename));
        }

        log::info!(
            "Merged {} resource(s) from {} application(s) into {}",
            entries.len(),
            applications.len(),
            self.output_dir.display()
        );
        Ok(entries)
    }

    /// Resolves every resource to its output name without touching the output
    /// directory. Application names must be valid and unique. A later resource of the same application replaces an earlier
    /// one with the same name in place.
    fn plan<'r>(
        &self,
        applications: &'r [Application],
    ) -> Result<Vec<(ConfigResource<'r>, String)>> {
        let mut names = HashSet::with_capacity(applications.len());
        for application in applications {
            resources::validate_application_name(application.name())?;
            if !names.insert(application.name()) {
                return Err(Error::configuration(
                    application.name(),
                    "application name is used more than once",
                ));
            }
        }

        let mut plan: Vec<(ConfigResource<'r>, String)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for application in applications {
            let mut found = 0usize;
            for resource in resources::discover(application)? {
                let resource = resource?;
                let output_filename = resource.output_filename()?;
                found += 1;

                if output_filename == self.manifest_file_name {
                    return Err(Error::configuration(
                        application.name(),
                        format!(
                            "resource `{}` would overwrite the manifest `{}`",
                            resource.relative_path(),
                            self.manifest_file_name
                        ),
                    ));
                }

                match positions.entry(output_filename) {
                    hash_map::Entry::Vacant(slot) => {
                        let output_filename = slot.key().clone();
                        slot.insert(plan.len());
                        plan.push((resource, output_filename));
                    }
                    hash_map::Entry::Occupied(slot) => {
                        let (previous, output_filename) = &mut plan[*slot.get()];
                        if previous.application().name() != application.name() {
                            return Err(Error::configuration(
                                application.name(),
                                format!(
                                    "`{}` maps to `{}`, already taken by application `{}`",
                                    resource.relative_path(),
                                    output_filename,
                                    previous.application().name()
                                ),
                            ));
                        }
                        log::warn!(
                            "{}: `{}` overwrites `{}` as {}",
                            application.name(),
                            resource.relative_path(),
                            previous.relative_path(),
                            output_filename
                        );
                        *previous = resource;
                    }
                }
            }
            log::debug!("{}: {} resource(s) discovered", application.name(), found);
        }

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, contents).unwrap();
    }

    fn names(entries: &[BundleEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.output_filename.as_str()).collect()
    }

    #[test]
    fn test_assemble_orders_by_application_then_discovery() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b/z.xml", "z");
        write(temp.path(), "b/a.xml", "a");
        write(temp.path(), "a/m.xml", "m");
        let out = temp.path().join("out");

        let entries = assemble(
            &[
                Application::new("second", temp.path().join("b")),
                Application::new("first", temp.path().join("a")),
            ],
            &out,
        )
        .unwrap();

        assert_eq!(names(&entries), ["second.a.xml", "second.z.xml", "first.m.xml"]);
        assert_eq!(entries[0].relative_path, "a.xml");
        assert_eq!(entries[0].application, "second");
    }

    #[test]
    fn test_collision_within_application_last_wins() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/one/globals.xml", "<first/>");
        write(temp.path(), "app/two/globals.xml", "<second/>");
        write(temp.path(), "app/zz.xml", "<zz/>");
        let out = temp.path().join("out");

        let entries = assemble(&[Application::new("app", temp.path().join("app"))], &out).unwrap();

        assert_eq!(names(&entries), ["app.globals.xml", "app.zz.xml"]);
        assert_eq!(entries[0].relative_path, "two/globals.xml");
        assert_eq!(
            stdfs::read_to_string(out.join("app.globals.xml")).unwrap(),
            "<second/>"
        );
    }

    #[test]
    fn test_cross_application_name_clash_is_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "one/c.xml", "x");
        write(temp.path(), "two/b.c.xml", "y");
        let out = temp.path().join("out");

        let err = assemble(
            &[
                Application::new("a.b", temp.path().join("one")),
                Application::new("a", temp.path().join("two")),
            ],
            &out,
        )
        .unwrap_err();

        assert_eq!(err.application(), Some("a"));
        assert!(!out.exists());
    }

    #[test]
    fn test_resource_shadowing_manifest_is_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/properties", "x");

        let err = assemble(
            &[Application::new("mule-deploy", temp.path().join("app"))],
            &temp.path().join("out"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_missing_root_fails_before_copying() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good/config.xml", "<config/>");
        let out = temp.path().join("out");

        let err = assemble(
            &[
                Application::new("good", temp.path().join("good")),
                Application::new("missing", temp.path().join("missing")),
            ],
            &out,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.application(), Some("missing"));
        assert!(!out.join("good.config.xml").exists());
    }

    #[test]
    fn test_application_name_cannot_leave_output_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/globals.xml", "<globals/>");
        let out = temp.path().join("target/out");

        let err = assemble(
            &[Application::new("../escaped", temp.path().join("app"))],
            &out,
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidName(_)));
        assert!(!temp.path().join("target/escaped.globals.xml").exists());
        assert!(!out.exists());
    }

    #[test]
    fn test_duplicate_application_names_are_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "one/globals.xml", "<one/>");
        write(temp.path(), "two/globals.xml", "<two/>");
        let out = temp.path().join("out");

        let err = assemble(
            &[
                Application::new("app", temp.path().join("one")),
                Application::new("app", temp.path().join("two")),
            ],
            &out,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.application(), Some("app"));
        assert!(!out.exists());
    }

    #[test]
    fn test_resource_name_with_separator_fails_before_copying() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/config.xml", "<config/>");
        write(temp.path(), "app/a,b.xml", "<ab/>");
        let out = temp.path().join("out");

        let err = assemble(&[Application::new("app", temp.path().join("app"))], &out)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidName(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_bundle_writes_manifest_and_archive() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/config.xml", "<config/>");
        let out = temp.path().join("out");
        let zip_path = temp.path().join("bundle.zip");

        let settings = SettingsBuilder::new()
            .output_dir(&out)
            .application(Application::new("app", temp.path().join("app")))
            .archive(&zip_path)
            .build()
            .unwrap();
        let output = Bundler::new(settings).bundle().unwrap();

        assert_eq!(output.manifest_path, out.join("mule-deploy.properties"));
        assert_eq!(
            stdfs::read_to_string(&output.manifest_path).unwrap(),
            "config.resources=app.config.xml\n"
        );

        let artifact = output.artifact.unwrap();
        assert_eq!(artifact.path, zip_path);
        assert_eq!(artifact.size, stdfs::metadata(&zip_path).unwrap().len());
        assert_eq!(artifact.checksum.len(), 64);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(AssemblyPhase::Manifesting.to_string(), "manifesting");
        assert_eq!(AssemblyPhase::Failed.to_string(), "failed");
    }
}
