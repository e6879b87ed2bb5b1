//! Key-consistency guard for envelope writes.
//!
//! Refuses to mix ciphertexts from different KMS keys in one envelope.

use tracing::debug;

use super::envelope::Envelope;
use crate::errors::{Result, SctlError};

/// Whether writing a secret encrypted under `key` keeps `envelope`
/// decryptable with a single key.
///
/// Rules, first match wins:
/// 1. secrets present, no recorded key, `key` non-empty: allowed. This is
///    the first write after a legacy migration; `key` becomes the record.
/// 2. no secrets and no recorded key: allowed (first run).
/// 3. otherwise the recorded key must equal `key`.
pub fn accepts_key(envelope: &Envelope, key: &str) -> bool {
    if !envelope.secrets.is_empty() && envelope.key_uri.is_empty() && !key.is_empty() {
        debug!("no key_uri in envelope, presuming the supplied key is correct");
        return true;
    }

    if envelope.key_uri.is_empty() && envelope.secrets.is_empty() {
        debug!("envelope is empty with no key_uri, treating as first run");
        return true;
    }

    envelope.key_uri == key
}

/// [`accepts_key`] as a `Result`, naming both keys on refusal.
pub fn ensure_key(envelope: &Envelope, key: &str) -> Result<()> {
    if accepts_key(envelope, key) {
        Ok(())
    } else {
        Err(SctlError::KeyMismatch {
            envelope_key: envelope.key_uri.clone(),
            requested_key: key.to_string(),
        })
    }
}
