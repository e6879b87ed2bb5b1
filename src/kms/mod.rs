//! Key management service collaborator.
//!
//! The envelope store never encrypts anything itself. Commands obtain a
//! [`Kms`] for the key reference they were given, and the helpers here
//! turn plaintext into the text-encoded ciphertext stored in a
//! [`Secret`] and back.

pub mod local;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{Result, SctlError};
use crate::vault::{Encoding, Secret};

pub use local::LocalKms;

/// Encrypt/decrypt capability offered by a KMS backend.
///
/// Errors from the backend (network, permissions, bad key) are passed
/// through unmodified and never retried.
pub trait Kms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Pick a backend for `key_reference`.
///
/// `file://<path>` and bare paths select the local keyfile backend.
/// Google Cloud KMS key names (`projects/...`) need an OAuth credential
/// flow this build does not ship, so they are rejected.
pub fn from_key_reference(key_reference: &str) -> Result<Box<dyn Kms>> {
    if key_reference.is_empty() {
        return Err(SctlError::MissingKey);
    }
    if key_reference.starts_with("projects/") {
        return Err(SctlError::UnsupportedKeyReference(key_reference.to_string()));
    }

    let path = key_reference
        .strip_prefix(local::SCHEME)
        .unwrap_or(key_reference);
    Ok(Box::new(LocalKms::open(path)?))
}

/// Wrap, encrypt and text-encode `plaintext` for storage.
pub fn encrypt_value(kms: &dyn Kms, plaintext: &[u8], encoding: Encoding) -> Result<String> {
    let cypher = kms.encrypt(&encoding.wrap(plaintext))?;
    Ok(BASE64.encode(cypher))
}

/// Decrypt a text-encoded blob without any encoding unwrap.
pub fn decrypt_blob(kms: &dyn Kms, blob: &str) -> Result<Vec<u8>> {
    let raw = BASE64
        .decode(blob.trim())
        .map_err(|e| SctlError::InvalidEncoding {
            encoding: "base64".into(),
            reason: e.to_string(),
        })?;
    kms.decrypt(&raw)
}

/// Recover the original plaintext of a stored secret.
pub fn decrypt_secret(kms: &dyn Kms, secret: &Secret) -> Result<Vec<u8>> {
    let decrypted = decrypt_blob(kms, &secret.ciphertext)?;
    secret.encoding.unwrap_plaintext(&decrypted)
}
