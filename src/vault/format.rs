//! Envelope file formats and the loader that reconciles them.
//!
//! Two shapes have existed on disk:
//!
//! ```text
//! legacy (v1):  [ {secret}, {secret}, ... ]
//! current (v2): { "key_uri": "...", "version": "2", "secrets": [ {secret}, ... ] }
//! ```
//!
//! Loading tries the current shape first and falls back to the legacy
//! one. A legacy file is migrated in memory only; the next save writes
//! it back in the current shape.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::collection::SecretCollection;
use super::envelope::Envelope;
use crate::errors::{Result, SctlError};

/// Version tag written into every envelope.
pub const CURRENT_VERSION: &str = "2";

/// Outcome of loading an envelope, tagged by where its data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedEnvelope {
    /// No file existed; this is a first run.
    Fresh(Envelope),
    /// The file was already in the current format.
    Current(Envelope),
    /// The file was a legacy bare array, wrapped into a new envelope.
    Migrated(Envelope),
}

impl LoadedEnvelope {
    pub fn into_envelope(self) -> Envelope {
        match self {
            Self::Fresh(e) | Self::Current(e) | Self::Migrated(e) => e,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            Self::Fresh(e) | Self::Current(e) | Self::Migrated(e) => e,
        }
    }

    pub fn is_migrated(&self) -> bool {
        matches!(self, Self::Migrated(_))
    }
}

/// Parse bytes as a current-format envelope.
///
/// Only a JSON object qualifies. Missing fields fall back to empty
/// values, matching what older writers of this shape produced.
pub fn parse_current(data: &[u8]) -> std::result::Result<Envelope, String> {
    let first = data.iter().copied().find(|b| !b.is_ascii_whitespace());
    if first != Some(b'{') {
        return Err("root is not a JSON object".into());
    }
    serde_json::from_slice(data).map_err(|e| e.to_string())
}

/// Parse bytes as a legacy bare array of secrets. A literal `null`
/// is what older writers produced for an empty list.
pub fn parse_legacy(data: &[u8]) -> std::result::Result<SecretCollection, String> {
    serde_json::from_slice::<Option<SecretCollection>>(data)
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string())
}

/// Load the envelope at `path`, migrating legacy data in memory.
///
/// A missing file is not an error. Any other read failure, or content
/// matching neither shape, is surfaced.
pub fn load(path: &Path) -> Result<LoadedEnvelope> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "no envelope found, initializing empty envelope");
            return Ok(LoadedEnvelope::Fresh(Envelope::new(path)));
        }
        Err(e) => return Err(e.into()),
    };

    let current_err = match parse_current(&data) {
        Ok(mut envelope) => {
            envelope.path = path.to_path_buf();
            return Ok(LoadedEnvelope::Current(envelope));
        }
        Err(e) => e,
    };

    debug!(path = %path.display(), "falling back to legacy envelope parser");
    match parse_legacy(&data) {
        Ok(secrets) => Ok(LoadedEnvelope::Migrated(Envelope::from_legacy(path, secrets))),
        Err(legacy_err) => Err(SctlError::MalformedEnvelope {
            path: path.to_path_buf(),
            reason: format!("current format: {current_err}; legacy format: {legacy_err}"),
        }),
    }
}

/// Write an envelope to `path`, replacing any existing file.
///
/// The JSON goes to a temp file beside the target which is then renamed
/// over it, so a failed write leaves the previous file in place.
pub fn write_envelope(path: &Path, envelope: &Envelope) -> Result<()> {
    let json = serde_json::to_string_pretty(envelope)
        .map_err(|e| SctlError::SerializationError(format!("envelope: {e}")))?;

    let tmp_path = temp_path_for(path);
    if let Err(e) = replace_via(&tmp_path, path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

fn replace_via(tmp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(tmp_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, fs::Permissions::from_mode(0o660))?;
    }

    fs::rename(tmp_path, path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
