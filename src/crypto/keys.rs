//! Data-key derivation using HKDF-SHA256.
//!
//! The data key used by the local KMS backend is expanded from the
//! keyfile bytes with a fixed context string.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Result, SctlError};

/// Length of derived keys (256 bits).
pub const KEY_LEN: usize = 32;

const DATA_KEY_INFO: &[u8] = b"sctl-local-kms:data-key";

/// A 32-byte key that zeroes its memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DataKey {
    bytes: [u8; KEY_LEN],
}

impl DataKey {
    /// Expand the envelope data key from raw keyfile bytes.
    pub fn derive(keyfile_bytes: &[u8]) -> Result<Self> {
        let hk = Hkdf::<Sha256>::new(None, keyfile_bytes);

        let mut bytes = [0u8; KEY_LEN];
        hk.expand(DATA_KEY_INFO, &mut bytes)
            .map_err(|e| SctlError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
