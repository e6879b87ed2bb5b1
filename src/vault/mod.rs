//! Vault module — versioned envelope storage for KMS-encrypted secrets.
//!
//! This module provides:
//! - `Secret` and `Encoding` types (`secret`)
//! - The ordered `SecretCollection` with upsert/remove/find (`collection`)
//! - The versioned `Envelope` and its save path (`envelope`)
//! - Current/legacy parsing and the migrating loader (`format`)
//! - Envelope path resolution (`paths`)
//! - The key-consistency guard for writes (`guard`)
//! - High-level `EnvelopeStore` operations (`store`)

pub mod collection;
pub mod envelope;
pub mod format;
pub mod guard;
pub mod paths;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use collection::SecretCollection;
pub use envelope::Envelope;
pub use format::{LoadedEnvelope, CURRENT_VERSION};
pub use paths::{resolve_envelope_path, DEFAULT_ENVELOPE_FILE};
pub use secret::{Encoding, Secret};
pub use store::EnvelopeStore;
