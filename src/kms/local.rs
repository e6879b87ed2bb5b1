//! Local keyfile KMS backend.
//!
//! Encrypts with AES-256-GCM under a data key derived from a 32-byte
//! keyfile. Meant for single-operator use where no cloud KMS is
//! available; the keyfile must be kept out of version control.

use std::path::Path;

use super::Kms;
use crate::crypto::{self, DataKey};
use crate::errors::Result;

/// Prefix of local key references.
pub const SCHEME: &str = "file://";

/// Associated data bound into every local ciphertext.
const AAD: &[u8] = b"sctl-local-kms-v1";

pub struct LocalKms {
    key: DataKey,
}

impl LocalKms {
    /// Load the keyfile at `path` and derive its data key.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let keyfile = crypto::load_keyfile(path)?;
        let key = DataKey::derive(&keyfile)?;
        Ok(Self { key })
    }

    /// The key reference to record for a keyfile at `path`.
    pub fn key_reference(path: &Path) -> String {
        format!("{SCHEME}{}", path.display())
    }
}

impl Kms for LocalKms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        crypto::seal(self.key.as_bytes(), plaintext, AAD)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        crypto::open(self.key.as_bytes(), ciphertext, AAD)
    }
}
