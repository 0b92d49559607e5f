//! Manifest parsing and bundle verification.

use super::{CONFIG_RESOURCES_KEY, RESOURCE_SEPARATOR, writer::continues};
use crate::{
    bail,
    bundler::error::{ErrorExt, Result},
};
use std::{collections::HashSet, fs, path::Path};

/// Parsed deployment descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentManifest {
    /// All properties in file order, `config.resources` included.
    pub properties: Vec<(String, String)>,
}

impl DeploymentManifest {
    /// Returns the value of `key`, last definition wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the listed configuration resources, or `None` when the key is
    /// absent. An empty value yields an empty list.
    pub fn config_resources(&self) -> Option<Vec<&str>> {
        let value = self.get(CONFIG_RESOURCES_KEY)?;
        Some(
            value
                .split(RESOURCE_SEPARATOR)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

/// Reads and parses the manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<DeploymentManifest> {
    let text = fs::read_to_string(path).fs_context("reading deployment manifest", path)?;
    Ok(parse_properties(&text))
}

/// Parses properties text: comments, `=`/`:`/whitespace separators, line
/// continuations and backslash escapes.
pub fn parse_properties(text: &str) -> DeploymentManifest {
    let mut properties = Vec::new();
    let mut logical = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if logical.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if continues(line) {
            logical.push_str(&line[..line.len() - 1]);
            continue;
        }
        logical.push_str(line);
        properties.push(split_pair(&logical));
        logical.clear();
    }
    if !logical.is_empty() {
        properties.push(split_pair(&logical));
    }

    DeploymentManifest { properties }
}

fn split_pair(line: &str) -> (String, String) {
    let mut key = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    key.push(unescape(next));
                }
            }
            '=' | ':' => break,
            ' ' | '\t' | '\x0c' => {
                while chars.peek().is_some_and(|c| matches!(c, ' ' | '\t' | '\x0c')) {
                    chars.next();
                }
                if chars.peek().is_some_and(|c| matches!(c, '=' | ':')) {
                    chars.next();
                }
                break;
            }
            _ => key.push(c),
        }
    }

    while chars.peek().is_some_and(|c| matches!(c, ' ' | '\t' | '\x0c')) {
        chars.next();
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                value.push(unescape(next));
            }
        } else {
            value.push(c);
        }
    }

    (key, value)
}

fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\x0c',
        other => other,
    }
}

/// Checks that the manifest in `output_dir` and the directory contents agree.
///
/// Every listed name must be listed once and exist as a regular file.
/// Returns the parsed manifest.
pub fn verify_bundle(output_dir: &Path, manifest_file_name: &str) -> Result<DeploymentManifest> {
    let manifest_path = output_dir.join(manifest_file_name);
    let manifest = read_manifest(&manifest_path)?;

    let Some(resources) = manifest.config_resources() else {
        bail!(
            "{} has no `{CONFIG_RESOURCES_KEY}` entry",
            manifest_path.display()
        );
    };

    let mut seen = HashSet::new();
    for name in &resources {
        if !seen.insert(*name) {
            bail!("{} lists `{name}` more than once", manifest_path.display());
        }
        if !output_dir.join(name).is_file() {
            bail!(
                "{} lists `{name}` but the file is missing from {}",
                manifest_path.display(),
                output_dir.display()
            );
        }
    }

    log::debug!(
        "Verified {} resource(s) in {}",
        resources.len(),
        output_dir.display()
    );
    Ok(manifest)
}
