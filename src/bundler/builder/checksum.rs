//! Checksum calculation for bundle artifacts.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

/// Calculates the SHA256 checksum of a file.
///
/// Reads the file in 8KB chunks and returns the hex-encoded digest
/// (64 characters).
pub fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
