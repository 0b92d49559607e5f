//! File system utilities for bundling.
//!
//! Synchronous helpers with idempotent directory handling and byte-exact
//! copies.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
};

/// Creates a new file at the given path, creating any parent directories as needed.
///
/// Returns a `BufWriter` for efficient writing operations.
pub fn create_file(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path)?;
    }

    // create_dir_all already succeeds when the directory exists
    fs::create_dir_all(path).fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies the bytes of a regular file, replacing `to` if it exists.
///
/// No transformation is applied. Returns the number of bytes copied.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<u64> {
    if !from.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", from.display()),
        ));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)?;
    }
    fs::copy(from, to)
}
