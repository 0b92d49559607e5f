//! Output filename resolution.
//!
//! A resource lands in the bundle as `<application>.<file base name>`. The
//! application prefix is the only collision avoidance: two applications may
//! ship `globals.xml`, but two `globals.xml` files in different directories of
//! the same application map to the same output name.

use crate::bundler::error::{Error, Result};

/// Separator between the application name and the file base name.
pub const NAME_SEPARATOR: char = '.';

/// Returns the final segment of a `/`-separated relative path.
pub fn last_path_segment(relative_path: &str) -> &str {
    relative_path.rsplit('/').next().unwrap_or(relative_path)
}

/// Characters that would split or break the `config.resources` value.
const MANIFEST_BREAKING: [char; 3] = [',', '\n', '\r'];

/// Checks that `name` can prefix output filenames inside the bundle.
///
/// # Errors
///
/// [`Error::InvalidName`] if the name is empty, is `.` or `..`, contains a
/// path separator, or contains a character the manifest cannot carry.
pub fn validate_application_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName(
            "application name must not be empty".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(Error::InvalidName(format!(
            "application name `{name}` is not allowed"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::InvalidName(format!(
            "application name `{name}` must not contain path separators"
        )));
    }
    if name.contains(MANIFEST_BREAKING) {
        return Err(Error::InvalidName(format!(
            "application name `{}` must not contain `,` or line breaks",
            name.escape_debug()
        )));
    }
    Ok(())
}

/// Computes the bundle-unique output filename for a resource.
///
/// The result is always a plain file name, safe to join onto the output
/// directory and to list in the manifest.
///
/// # Errors
///
/// [`Error::InvalidName`] if the application name is not valid (see
/// [`validate_application_name`]), or the file base name is empty or contains
/// `,` or a line break.
pub fn output_filename(application_name: &str, relative_path: &str) -> Result<String> {
    validate_application_name(application_name)?;

    let base_name = last_path_segment(relative_path);
    if base_name.is_empty() {
        return Err(Error::InvalidName(format!(
            "resource `{relative_path}` of `{application_name}` has no file name"
        )));
    }
    if base_name.contains(MANIFEST_BREAKING) {
        return Err(Error::InvalidName(format!(
            "resource `{}` of `{application_name}` has `,` or a line break in its name",
            relative_path.escape_debug()
        )));
    }

    Ok(format!("{application_name}{NAME_SEPARATOR}{base_name}"))
}
