//! High-level envelope operations used by CLI commands.
//!
//! Each operation is one load-mutate-save cycle against the envelope
//! file. Nothing is locked: two processes writing the same envelope
//! race, and the later save wins.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use super::collection::SecretCollection;
use super::format::{self, LoadedEnvelope};
use super::guard;
use super::paths::{envelope_path_for_write, DEFAULT_ENVELOPE_FILE};
use super::secret::Secret;
use crate::errors::Result;

/// Entry point for envelope reads and writes.
///
/// Holds the default envelope filename, applied whenever a caller
/// passes an empty path or a directory.
#[derive(Debug, Clone)]
pub struct EnvelopeStore {
    default_file: String,
}

impl Default for EnvelopeStore {
    fn default() -> Self {
        Self::new(DEFAULT_ENVELOPE_FILE)
    }
}

impl EnvelopeStore {
    pub fn new(default_file: impl Into<String>) -> Self {
        Self {
            default_file: default_file.into(),
        }
    }

    /// The concrete file an operation on `envelope_path` will touch.
    pub fn locate(&self, envelope_path: &str) -> PathBuf {
        envelope_path_for_write(envelope_path, &self.default_file)
    }

    /// Load the envelope, keeping track of whether it was migrated.
    pub fn load(&self, envelope_path: &str) -> Result<LoadedEnvelope> {
        format::load(&self.locate(envelope_path))
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Upsert `secret` and record `key_reference` as the envelope key.
    ///
    /// With `enforce_key_check` the write is refused, before anything is
    /// mutated, when `key_reference` conflicts with the recorded key.
    /// Returns whether an entry of the same name was replaced.
    pub fn add_secret(
        &self,
        secret: Secret,
        key_reference: &str,
        enforce_key_check: bool,
        envelope_path: &str,
    ) -> Result<bool> {
        let mut envelope = self.load(envelope_path)?.into_envelope();

        if enforce_key_check {
            guard::ensure_key(&envelope, key_reference)?;
        }

        let name = secret.name.clone();
        let rotated = envelope.secrets.contains(&name);
        envelope.secrets.add(secret);
        envelope.key_uri = key_reference.to_string();
        envelope.save()?;

        info!(name = %name, rotated, path = %envelope.path.display(), "secret written");
        Ok(rotated)
    }

    /// All secrets plus the recorded key reference. A missing envelope
    /// reads as empty.
    pub fn read_secrets(&self, envelope_path: &str) -> Result<(SecretCollection, String)> {
        let envelope = self.load(envelope_path)?.into_envelope();
        Ok((envelope.secrets, envelope.key_uri))
    }

    /// A single secret plus the recorded key reference.
    pub fn find_secret(&self, name: &str, envelope_path: &str) -> Result<(Secret, String)> {
        let envelope = self.load(envelope_path)?.into_envelope();
        let secret = envelope.secrets.find(name)?.clone();
        Ok((secret, envelope.key_uri))
    }

    /// Remove `name` and save. Returns whether the secret existed.
    pub fn delete_secret(&self, name: &str, envelope_path: &str) -> Result<bool> {
        let mut envelope = self.load(envelope_path)?.into_envelope();

        let existed = envelope.secrets.contains(name);
        envelope.secrets.remove(name);
        envelope.save()?;

        Ok(existed)
    }

    /// Re-encrypt every secret under `new_key_reference` in one save.
    ///
    /// `transform` maps an entry to its new ciphertext. The first failure
    /// aborts the whole operation and leaves the file untouched. Returns
    /// the number of re-encrypted secrets.
    pub fn rekey<F>(&self, new_key_reference: &str, envelope_path: &str, mut transform: F) -> Result<usize>
    where
        F: FnMut(&Secret) -> Result<String>,
    {
        let mut envelope = self.load(envelope_path)?.into_envelope();

        let now = Utc::now();
        for secret in envelope.secrets.iter_mut() {
            secret.ciphertext = transform(secret)?;
            secret.created = now;
        }

        envelope.key_uri = new_key_reference.to_string();
        envelope.save()?;

        Ok(envelope.secrets.len())
    }
}
