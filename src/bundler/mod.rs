//! Bundle assembly for host runtimes that load configuration files by name.
//!
//! Several independently built applications each contribute configuration
//! resources. The bundler merges them into one flat output directory, naming
//! each file `<application>.<file name>`, and writes a deployment manifest
//! listing every merged file.
//!
//! - [`resources`] - discovery and output naming
//! - [`builder`] - the [`Bundler`] orchestrator
//! - [`manifest`] - descriptor writing, reading and verification
//! - [`archive`] - zip packages in and bundle archives out
//! - [`settings`] - [`Settings`] and [`SettingsBuilder`]

pub mod archive;
pub mod builder;
pub mod error;
pub mod manifest;
pub mod resources;
pub mod settings;
pub mod utils;

pub use builder::{AssemblyPhase, BundleOutput, BundledArtifact, Bundler, assemble};
pub use error::{Error, Result};
pub use resources::{BundleEntry, ConfigResource};
pub use settings::{Application, DEFAULT_MANIFEST_FILE_NAME, Settings, SettingsBuilder};
