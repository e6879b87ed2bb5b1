//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SctlError};
use crate::vault::EnvelopeStore;

/// Maximum length of a secret name.
const MAX_NAME_LEN: usize = 256;

/// sctl: manage secrets encrypted by a key management service.
#[derive(Parser)]
#[command(
    name = "sctl",
    about = "Manage secrets encrypted by KMS",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Envelope file or directory (default: .scuttle.json)
    #[arg(long, global = true)]
    pub envelope: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a secret, or rotate an existing one
    Add {
        /// Secret name (stored upper-cased)
        name: String,
        /// Secret value (omit to pipe via stdin or be prompted)
        value: Option<String>,
        /// KMS key reference
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
        /// Store the value as-is instead of base64-wrapping it
        #[arg(long)]
        no_decode: bool,
        /// Write even if the envelope records a different key
        #[arg(long)]
        skip_key_check: bool,
    },

    /// Decrypt and print a single secret
    Read {
        /// Secret name
        name: String,
        /// KMS key reference (default: the envelope's key)
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
    },

    /// List known secrets
    List,

    /// Remove a secret
    Rm {
        /// Secret name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Run a command with secrets exported as environment variables
    Run {
        /// KMS key reference (default: the envelope's key)
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
        /// Command and arguments (after --)
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Re-encrypt every secret under a new key
    Rekey {
        /// Key reference to re-encrypt under
        #[arg(long)]
        new_key: String,
        /// Current key reference (default: the envelope's key)
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
    },

    /// Encrypt a value into a blob for copy/paste sharing
    Send {
        /// Value to share (omit to pipe via stdin or be prompted)
        value: Option<String>,
        /// KMS key reference
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
    },

    /// Decrypt a blob produced by `send`
    Receive {
        /// Base64 blob
        blob: String,
        /// KMS key reference
        #[arg(long, env = "SCTL_KEY")]
        key: Option<String>,
    },

    /// Generate a local keyfile and print its key reference
    Keygen {
        /// Where to write the keyfile
        path: String,
    },

    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The raw `--envelope` argument; empty when not given.
pub fn envelope_arg(cli: &Cli) -> &str {
    cli.envelope.as_deref().unwrap_or("")
}

/// Load project settings from the working directory and build the
/// envelope store they configure.
pub fn open_store() -> Result<(Settings, EnvelopeStore)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let store = EnvelopeStore::new(settings.envelope_file.clone());
    Ok((settings, store))
}

/// Key reference from the flag or settings, required.
pub fn require_key(settings: &Settings, explicit: Option<&str>) -> Result<String> {
    settings.key_reference(explicit).ok_or(SctlError::MissingKey)
}

/// Key reference from the flag or settings, else the one recorded in
/// the envelope.
pub fn key_or_recorded(settings: &Settings, explicit: Option<&str>, recorded: &str) -> Result<String> {
    match settings.key_reference(explicit) {
        Some(key) => Ok(key),
        None if !recorded.is_empty() => Ok(recorded.to_string()),
        None => Err(SctlError::MissingKey),
    }
}

/// Read a secret value from one of three sources: the command line,
/// piped stdin, or an interactive hidden prompt.
///
/// Empty input is refused.
pub fn read_value(value: Option<&str>, prompt: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        v.as_bytes().to_vec()
    } else if !io::stdin().is_terminal() {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        trim_trailing_newlines(&buf).to_vec()
    } else {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| SctlError::CommandFailed(format!("input prompt: {e}")))?
            .into_bytes()
    };

    if bytes.is_empty() {
        return Err(SctlError::EmptyInput);
    }
    Ok(Zeroizing::new(bytes))
}

/// Strip trailing `\r`/`\n` bytes left by piped input.
fn trim_trailing_newlines(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Upper-case a secret name and check it is usable as an environment
/// variable name.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 256 characters.
pub fn normalize_secret_name(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(SctlError::CommandFailed("secret name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(SctlError::CommandFailed(format!(
            "secret name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(SctlError::CommandFailed(format!(
            "secret name '{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(name.to_ascii_uppercase())
}
