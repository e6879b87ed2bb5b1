//! `sctl keygen` — create a local keyfile for the `file://` backend.

use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::crypto;
use crate::errors::Result;
use crate::kms::LocalKms;

/// Execute the `keygen` command.
pub fn execute(path: &str) -> Result<()> {
    let path = PathBuf::from(path);
    let bytes = Zeroizing::new(crypto::generate_keyfile(&path)?);

    // Record an absolute reference so it works from any directory.
    let absolute = std::fs::canonicalize(&path).unwrap_or(path);

    output::success(&format!("Keyfile written to {}", absolute.display()));
    output::info(&format!("Fingerprint: {}", crypto::fingerprint(&bytes)));
    output::warning("Keep this file out of version control.");

    println!("{}", LocalKms::key_reference(&absolute));

    Ok(())
}
