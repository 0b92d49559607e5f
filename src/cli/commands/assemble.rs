//! The assemble command: resolve sources, merge, write the manifest.

use crate::{
    bundler::{BundleOutput, Bundler, SettingsBuilder, manifest, utils::fs},
    cli::{Args, RuntimeConfig, report::BundleReport},
    error::{BundlerError, CliError, Result},
    metadata::{self, BundleDescriptor},
    source::Staging,
};
use std::{collections::HashSet, path::Path};

/// Runs one assembly as described by `args`.
///
/// Returns the process exit code. Exit code 0 guarantees that the manifest
/// and every file it lists exist in the output directory.
pub fn run(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let descriptor = match &args.config {
        Some(path) => metadata::load_descriptor(path)?,
        None => BundleDescriptor::default(),
    };

    let mut specs = descriptor.application_specs();
    specs.extend(args.apps.iter().cloned());
    if specs.is_empty() {
        return Err(BundlerError::Cli(CliError::MissingArgument {
            argument: "--app NAME=PATH".to_string(),
        }));
    }

    let output_dir = args
        .output_dir
        .clone()
        .or(descriptor.output_dir)
        .ok_or_else(|| {
            BundlerError::Cli(CliError::MissingArgument {
                argument: "--output-dir".to_string(),
            })
        })?;

    config.progress(&format!(
        "Bundling {} application(s) into {}",
        specs.len(),
        output_dir.display()
    ))?;

    let mut staging = Staging::new();
    let applications = staging.resolve(&specs)?;

    let mut builder = SettingsBuilder::new()
        .output_dir(&output_dir)
        .applications(applications);
    if let Some(name) = args
        .manifest_file_name
        .clone()
        .or(descriptor.manifest_file_name)
    {
        builder = builder.manifest_file_name(name);
    }
    if let Some(template) = args
        .manifest_template
        .as_ref()
        .or(descriptor.manifest_template.as_ref())
    {
        builder = builder.manifest_template(template);
    }
    if let Some(archive) = args.archive.as_ref().or(descriptor.archive.as_ref()) {
        builder = builder.archive(archive);
    }
    let settings = builder.build()?;

    if args.clean {
        config.verbose_println(&format!("Cleaning {}", output_dir.display()))?;
        fs::remove_dir_all(&output_dir)?;
    }

    let bundler = Bundler::new(settings);
    let output = bundler.bundle()?;

    for entry in &output.entries {
        config.verbose_println(&format!(
            "  {} <- {}:{}",
            entry.output_filename, entry.application, entry.relative_path
        ))?;
    }

    manifest::verify_bundle(&output_dir, bundler.settings().manifest_file_name())?;

    let stale = unlisted_files(&output_dir, &output, bundler.settings().manifest_file_name())?;
    if !stale.is_empty() {
        config.warn(&format!(
            "{} file(s) in {} are not listed in the manifest (use --clean to remove them)",
            stale.len(),
            output_dir.display()
        ))?;
        for name in &stale {
            config.verbose_println(&format!("  stale: {name}"))?;
        }
    }

    config.success(&format!(
        "Merged {} resource(s); manifest written to {}",
        output.entries.len(),
        output.manifest_path.display()
    ))?;
    if let Some(artifact) = &output.artifact {
        config.success(&format!("Bundle archive: {}", artifact.path.display()))?;
        config.indent(&format!("SHA256: {}", artifact.checksum))?;
    }

    if let Some(report_path) = &args.report {
        BundleReport::new(&output_dir, &output).write(report_path)?;
        config.verbose_println(&format!("Report written to {}", report_path.display()))?;
    }

    Ok(0)
}

/// Files left in the output directory by earlier runs.
fn unlisted_files(
    output_dir: &Path,
    output: &BundleOutput,
    manifest_file_name: &str,
) -> Result<Vec<String>> {
    let listed: HashSet<&str> = output
        .entries
        .iter()
        .map(|entry| entry.output_filename.as_str())
        .chain(std::iter::once(manifest_file_name))
        .collect();

    let mut stale = Vec::new();
    for entry in std::fs::read_dir(output_dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if !listed.contains(name.as_str()) {
            stale.push(name);
        }
    }
    stale.sort();
    Ok(stale)
}
