//! Manifest serialization.

use super::{CONFIG_RESOURCES_KEY, RESOURCE_SEPARATOR};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    resources::BundleEntry,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Writes the manifest for `entries` to `path`.
///
/// When `template` is given, its lines are carried over and only the
/// `config.resources` entry is replaced (or appended when missing).
///
/// # Errors
///
/// - [`Error::Fs`] if the template cannot be read
/// - [`Error::ManifestWrite`] if the manifest cannot be created or written
pub fn write_manifest(
    path: &Path,
    entries: &[BundleEntry],
    template: Option<&Path>,
) -> Result<PathBuf> {
    let template = template
        .map(|t| fs::read_to_string(t).fs_context("reading manifest template", t))
        .transpose()?;

    let contents = render_manifest(entries, template.as_deref());

    let write = || -> std::io::Result<()> {
        let mut file = crate::bundler::utils::fs::create_file(path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| Error::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Wrote {} with {} resource(s)",
        path.display(),
        entries.len()
    );
    Ok(path.to_path_buf())
}

/// Renders the manifest text.
pub fn render_manifest(entries: &[BundleEntry], template: Option<&str>) -> String {
    let resources_line = format!(
        "{CONFIG_RESOURCES_KEY}={}",
        escape_value(&join_resources(entries))
    );

    let Some(template) = template else {
        return format!("{resources_line}\n");
    };

    let mut out = String::with_capacity(template.len() + resources_line.len() + 1);
    let mut replaced = false;
    let mut skipping_continuation = false;

    for line in template.lines() {
        if skipping_continuation {
            skipping_continuation = continues(line);
            continue;
        }

        let trimmed = line.trim_start();
        if !trimmed.is_empty()
            && !trimmed.starts_with('#')
            && !trimmed.starts_with('!')
            && line_key(trimmed) == CONFIG_RESOURCES_KEY
        {
            if !replaced {
                out.push_str(&resources_line);
                out.push('\n');
                replaced = true;
            }
            skipping_continuation = continues(line);
            continue;
        }

        out.push_str(line);
        out.push('\n');
    }

    if !replaced {
        out.push_str(&resources_line);
        out.push('\n');
    }
    out
}

fn join_resources(entries: &[BundleEntry]) -> String {
    let mut joined = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            joined.push(RESOURCE_SEPARATOR);
        }
        joined.push_str(&entry.output_filename);
    }
    joined
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\")
}

/// Key of a non-comment properties line, up to the first unescaped separator.
pub(super) fn line_key(line: &str) -> String {
    let mut key = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    key.push(next);
                }
            }
            '=' | ':' | ' ' | '\t' | '\x0c' => break,
            _ => key.push(c),
        }
    }
    key
}

/// Whether a line ends with an odd number of backslashes.
pub(super) fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}
