//! Command execution functions for bundler operations.

mod assemble;

pub use assemble::run as assemble;
