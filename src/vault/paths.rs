//! Envelope path resolution.
//!
//! The caller may hand us nothing, a directory, or a file. The default
//! filename is a parameter so configuration can override it.

use std::path::{Path, PathBuf};

use crate::errors::{Result, SctlError};

/// Default envelope filename, relative to the working directory.
pub const DEFAULT_ENVELOPE_FILE: &str = ".scuttle.json";

/// Resolve `raw` to the concrete envelope file.
///
/// - empty: `default_file` in the working directory
/// - existing directory: `<dir>/<default_file>`
/// - existing file: `raw` unchanged
/// - anything else: [`SctlError::PathNotResolvable`]
pub fn resolve_envelope_path(raw: &str, default_file: &str) -> Result<PathBuf> {
    if raw.is_empty() {
        return Ok(PathBuf::from(default_file));
    }

    let path = Path::new(raw);
    if path.is_dir() {
        Ok(path.join(default_file))
    } else if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(SctlError::PathNotResolvable(path.to_path_buf()))
    }
}

/// Like [`resolve_envelope_path`], but a path that does not exist yet
/// is taken verbatim so a first write can create it.
pub fn envelope_path_for_write(raw: &str, default_file: &str) -> PathBuf {
    match resolve_envelope_path(raw, default_file) {
        Ok(path) => path,
        Err(_) => PathBuf::from(raw),
    }
}
