//! Zip handling at the edges of an assembly run.
//!
//! Applications may arrive as zip packages, which are unpacked into a staging
//! directory before discovery. A finished bundle can be packed into a single
//! zip for deployment.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter, write::SimpleFileOptions};

/// Returns whether `path` names a zip application package.
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Extracts the application package at `package` into `destination`.
///
/// Entries that would escape `destination` are rejected by the zip reader.
pub fn extract_application(package: &Path, destination: &Path) -> Result<()> {
    let file = File::open(package).fs_context("opening application package", package)?;
    let mut archive = ZipArchive::new(file).map_err(|source| archive_error(package, source))?;

    fs::create_dir_all(destination, true)?;
    archive
        .extract(destination)
        .map_err(|source| archive_error(package, source))?;

    log::debug!(
        "Extracted {} ({} entries) into {}",
        package.display(),
        archive.len(),
        destination.display()
    );
    Ok(())
}

/// Packs the named files of `bundle_dir` into a zip at `archive_path`.
///
/// Files are stored in the given order with a fixed timestamp, so identical
/// bundles produce identical archives.
pub fn pack_bundle(bundle_dir: &Path, files: &[&str], archive_path: &Path) -> Result<()> {
    let writer = fs::create_file(archive_path).fs_context("creating bundle archive", archive_path)?;
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for name in files {
        let source = bundle_dir.join(name);
        let mut input = File::open(&source).fs_context("opening bundled file", &source)?;
        zip.start_file(*name, options)
            .map_err(|e| archive_error(archive_path, e))?;
        io::copy(&mut input, &mut zip).fs_context("writing bundle archive", archive_path)?;
    }

    let mut writer = zip.finish().map_err(|e| archive_error(archive_path, e))?;
    writer.flush().fs_context("writing bundle archive", archive_path)?;
    Ok(())
}

fn archive_error(path: &Path, source: zip::result::ZipError) -> Error {
    Error::Archive {
        path: path.to_path_buf(),
        source,
    }
}
