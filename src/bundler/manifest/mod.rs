//! Deployment descriptor handling.
//!
//! The host runtime reads a Java-style properties file and loads every file
//! listed under `config.resources`. The bundler owns that one key; any other
//! key comes from an optional template and is written back untouched.

mod reader;
mod writer;

pub use reader::{DeploymentManifest, parse_properties, read_manifest, verify_bundle};
pub use writer::{render_manifest, write_manifest};

/// Key listing the configuration files the runtime loads.
pub const CONFIG_RESOURCES_KEY: &str = "config.resources";

/// Separator between file names in the `config.resources` value.
pub const RESOURCE_SEPARATOR: char = ',';
