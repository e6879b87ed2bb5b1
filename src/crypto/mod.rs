//! Cryptographic primitives backing the local KMS.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening (`encryption`)
//! - HKDF-based data-key derivation (`keys`)
//! - Keyfile generation and loading (`keyfile`)

pub mod encryption;
pub mod keyfile;
pub mod keys;

pub use encryption::{open, seal};
pub use keyfile::{fingerprint, generate_keyfile, load_keyfile};
pub use keys::DataKey;
