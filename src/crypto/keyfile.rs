//! Keyfiles for the local KMS backend.
//!
//! A keyfile is 32 random bytes on disk. Its path, as a `file://`
//! reference, is what gets recorded as the envelope's key reference.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::{Result, SctlError};

/// Expected length of a keyfile in bytes (256 bits).
pub const KEYFILE_LEN: usize = 32;

/// Generate a new random keyfile and write it to `path`.
///
/// Refuses to overwrite an existing file. On Unix the file is
/// restricted to owner read/write.
pub fn generate_keyfile(path: &Path) -> Result<Vec<u8>> {
    if path.exists() {
        return Err(SctlError::KeyfileError(format!(
            "keyfile already exists at {}",
            path.display()
        )));
    }

    let mut keyfile = vec![0u8; KEYFILE_LEN];
    rand::rng().fill_bytes(&mut keyfile);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                SctlError::KeyfileError(format!("cannot create keyfile directory: {e}"))
            })?;
        }
    }

    fs::write(path, &keyfile)
        .map_err(|e| SctlError::KeyfileError(format!("failed to write keyfile: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            SctlError::KeyfileError(format!("failed to set keyfile permissions: {e}"))
        })?;
    }

    Ok(keyfile)
}

/// Load a keyfile from disk and validate its length.
pub fn load_keyfile(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|e| {
        SctlError::KeyfileError(format!("failed to read keyfile {}: {e}", path.display()))
    })?;

    if data.len() != KEYFILE_LEN {
        return Err(SctlError::KeyfileError(format!(
            "keyfile must be exactly {} bytes, got {}",
            KEYFILE_LEN,
            data.len()
        )));
    }

    Ok(data)
}

/// Short SHA-256 fingerprint of a keyfile, for display.
pub fn fingerprint(keyfile_bytes: &[u8]) -> String {
    let hash = Sha256::digest(keyfile_bytes);
    BASE64.encode(&hash[..12])
}
