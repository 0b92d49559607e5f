//! Configuration structures for assembly runs.
//!
//! Settings are passed explicitly into the [`Bundler`](crate::bundler::Bundler);
//! nothing is read from process-wide state.

mod application;
mod builder;
mod core;

pub use application::Application;
pub use builder::SettingsBuilder;
pub use core::{DEFAULT_MANIFEST_FILE_NAME, Settings};
