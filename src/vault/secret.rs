//! Secret entries stored inside an envelope.
//!
//! Each entry holds its name, the ciphertext produced by the key
//! management service (already text-encoded, usually base64), the time
//! of its last write, and a marker saying whether the plaintext was
//! base64-wrapped before encryption.
//!
//! An example serialized entry:
//!
//! ```text
//! {
//!   "name": "A_SECRET",
//!   "cypher": "0xD34DB33F",
//!   "created": "2019-05-01T13:01:27.189242799-05:00",
//!   "encoding": "plain"
//! }
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SctlError};

/// How the plaintext was prepared before it was handed to the KMS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Plaintext was encrypted as-is. Entries written before the
    /// encoding marker existed have no field and land here.
    #[default]
    Plain,
    /// Plaintext was base64-wrapped before encryption.
    Base64,
}

impl Encoding {
    /// Prepare raw plaintext for encryption.
    pub fn wrap(self, plaintext: &[u8]) -> Vec<u8> {
        match self {
            Self::Plain => plaintext.to_vec(),
            Self::Base64 => BASE64.encode(plaintext).into_bytes(),
        }
    }

    /// Undo [`Encoding::wrap`] on freshly decrypted bytes.
    pub fn unwrap_plaintext(self, decrypted: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Plain => Ok(decrypted.to_vec()),
            Self::Base64 => BASE64
                .decode(decrypted)
                .map_err(|e| SctlError::InvalidEncoding {
                    encoding: self.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named ciphertext record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// The name of the secret (e.g. "DATABASE_URL").
    pub name: String,

    /// Opaque ciphertext as returned (and text-encoded) by the KMS.
    #[serde(rename = "cypher")]
    pub ciphertext: String,

    /// When this entry was last written. Rotation replaces it.
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub encoding: Encoding,
}

impl Secret {
    /// Build a new entry stamped with the current time.
    pub fn new(name: impl Into<String>, ciphertext: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            ciphertext: ciphertext.into(),
            created: Utc::now(),
            encoding,
        }
    }
}
