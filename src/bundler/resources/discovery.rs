//! Resource discovery for application trees.
//!
//! Every regular file below an application root is a configuration resource.
//! Entries are sorted by file name at each directory level, so the sequence is
//! the same on every run and every platform.

use super::ConfigResource;
use crate::bundler::{
    error::{Error, Result},
    settings::Application,
};
use std::{
    fs, io,
    path::{Component, Path},
};
use walkdir::WalkDir;

/// Lazy sequence of the resources of one application.
///
/// Yields an error and should be abandoned when an entry cannot be read or is
/// not a regular file.
pub struct Resources<'a> {
    application: &'a Application,
    walker: walkdir::IntoIter,
}

impl std::fmt::Debug for Resources<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("application", &self.application.name())
            .finish_non_exhaustive()
    }
}

/// Starts discovering the resources of `application`.
///
/// # Errors
///
/// [`Error::Configuration`] if the root does not exist or is not a directory.
pub fn discover(application: &Application) -> Result<Resources<'_>> {
    let root = application.root();
    let metadata = fs::metadata(root).map_err(|e| {
        Error::configuration(
            application.name(),
            format!("application root {} is not accessible: {e}", root.display()),
        )
    })?;
    if !metadata.is_dir() {
        return Err(Error::configuration(
            application.name(),
            format!("application root {} is not a directory", root.display()),
        ));
    }

    log::debug!(
        "Discovering resources of {} in {}",
        application.name(),
        root.display()
    );

    // walkdir descends with an explicit stack of open directories
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(Resources {
        application,
        walker,
    })
}

impl<'a> Iterator for Resources<'a> {
    type Item = Result<ConfigResource<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .unwrap_or_else(|| self.application.root())
                        .to_path_buf();
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                    return Some(Err(self.discovery_error(&path, source)));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                return Some(Err(self.discovery_error(
                    entry.path(),
                    io::Error::other("not a regular file"),
                )));
            }

            let relative_path = match relative_slash_path(self.application.root(), entry.path()) {
                Ok(relative_path) => relative_path,
                Err(source) => return Some(Err(self.discovery_error(entry.path(), source))),
            };

            log::trace!("Found {}:{}", self.application.name(), relative_path);
            return Some(Ok(ConfigResource::new(
                self.application,
                relative_path,
                entry.into_path(),
            )));
        }
    }
}

impl Resources<'_> {
    fn discovery_error(&self, path: &Path, source: io::Error) -> Error {
        Error::Discovery {
            application: self.application.name().to_string(),
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Path of `path` below `root`, joined with `/` regardless of platform.
fn relative_slash_path(root: &Path, path: &Path) -> io::Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| io::Error::other("entry is outside the application root"))?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8")
            })?),
            _ => return Err(io::Error::other("unexpected path component")),
        }
    }

    Ok(segments.join("/"))
}
