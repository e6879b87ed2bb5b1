use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in sctl.
#[derive(Debug, Error)]
pub enum SctlError {
    // --- Envelope errors ---
    #[error("Envelope at {path} is neither a current nor a legacy envelope: {reason}")]
    MalformedEnvelope { path: PathBuf, reason: String },

    #[error(
        "Key mismatch — envelope secrets are encrypted with '{envelope_key}', refusing to write with '{requested_key}'"
    )]
    KeyMismatch {
        envelope_key: String,
        requested_key: String,
    },

    #[error("Cannot resolve envelope path {0} — it is neither a file nor a directory")]
    PathNotResolvable(PathBuf),

    #[error("Secret {0} not found")]
    SecretNotFound(String),

    // --- Key management errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Keyfile error: {0}")]
    KeyfileError(String),

    #[error("Unsupported key reference '{0}'")]
    UnsupportedKeyReference(String),

    #[error("Missing configuration for key — pass --key or set SCTL_KEY")]
    MissingKey,

    #[error("Invalid {encoding} data: {reason}")]
    InvalidEncoding { encoding: String, reason: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Empty input detected. Aborting")]
    EmptyInput,

    #[error("Child process exited with code {0}")]
    ChildProcessFailed(i32),

    #[error("No command specified — use `sctl run -- <command>`")]
    NoCommandSpecified,
}

/// Convenience type alias for sctl results.
pub type Result<T> = std::result::Result<T, SctlError>;
