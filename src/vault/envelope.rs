//! The versioned envelope: format tag, key reference, and secrets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::collection::SecretCollection;
use super::format::{self, CURRENT_VERSION};
use crate::errors::Result;

/// On-disk container for a set of secrets.
///
/// Every ciphertext in `secrets` is assumed to be encrypted under
/// `key_uri` when it is non-empty. Writes check that through
/// [`crate::vault::guard`]; the envelope itself does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Reference of the KMS key used for every stored ciphertext.
    /// Empty on first run and right after a legacy migration.
    #[serde(default)]
    pub key_uri: String,

    #[serde(default)]
    pub version: String,

    /// Where this envelope was loaded from and will be saved to.
    #[serde(skip)]
    pub path: PathBuf,

    /// Older writers emit `null` for an empty list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub secrets: SecretCollection,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<SecretCollection, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SecretCollection>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Envelope {
    /// A fresh, empty envelope bound to `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            key_uri: String::new(),
            version: CURRENT_VERSION.to_string(),
            path: path.to_path_buf(),
            secrets: SecretCollection::new(),
        }
    }

    /// Wrap secrets read from a legacy bare-array file. The key that
    /// encrypted them is unknown, so the key reference stays empty.
    pub fn from_legacy(path: &Path, secrets: SecretCollection) -> Self {
        Self {
            secrets,
            ..Self::new(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the whole envelope and replace the file at `path`.
    pub fn save(&mut self) -> Result<()> {
        if self.version.is_empty() {
            self.version = CURRENT_VERSION.to_string();
        }
        if self.key_uri.is_empty() {
            warn!(
                path = %self.path.display(),
                "no key reference recorded, saving envelope without key_uri"
            );
        }
        format::write_envelope(&self.path, self)
    }
}
