//! Bundle orchestration and coordination.
//!
//! The [`Bundler`] runs one assembly:
//! 1. Discovers the resources of every application, in order
//! 2. Copies them into the output directory under their bundle names
//! 3. Writes the deployment manifest
//! 4. Optionally packs the directory into a zip [`BundledArtifact`]
//!
//! # Example
//!
//! ```no_run
//! use mule_bundler::bundler::{Application, Bundler, SettingsBuilder};
//!
//! # fn example() -> mule_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .output_dir("target/bundle-target/mule-bundle")
//!     .application(Application::new("test-app1", "apps/test-app1"))
//!     .build()?;
//!
//! let output = Bundler::new(settings).bundle()?;
//! for entry in &output.entries {
//!     println!("{} <- {}", entry.output_filename, entry.source_path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and assembly phases

mod checksum;
mod orchestrator;

pub use checksum::calculate_sha256;
pub use orchestrator::{AssemblyPhase, BundleOutput, BundledArtifact, Bundler, assemble};
