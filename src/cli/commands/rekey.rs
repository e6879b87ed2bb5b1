//! `sctl rekey` — re-encrypt every secret under a different key.
//!
//! Each entry is decrypted with the current key and encrypted with the
//! new one. The envelope is written once, after every entry succeeded.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{envelope_arg, key_or_recorded, open_store, Cli};
use crate::errors::Result;
use crate::kms;
use crate::vault::Encoding;

/// Execute the `rekey` command.
pub fn execute(cli: &Cli, new_key: &str, key: Option<&str>) -> Result<()> {
    let (settings, store) = open_store()?;
    let envelope_path = envelope_arg(cli);

    let (_, recorded) = store.read_secrets(envelope_path)?;
    let old_key = key_or_recorded(&settings, key, &recorded)?;

    let old_backend = kms::from_key_reference(&old_key)?;
    let new_backend = kms::from_key_reference(new_key)?;

    let count = store.rekey(new_key, envelope_path, |secret| {
        let decrypted = Zeroizing::new(kms::decrypt_blob(old_backend.as_ref(), &secret.ciphertext)?);
        // Already wrapped under the entry's encoding; re-encrypt as-is.
        kms::encrypt_value(new_backend.as_ref(), &decrypted, Encoding::Plain)
    })?;

    output::success(&format!(
        "Re-encrypted {count} secret(s) under {new_key}"
    ));

    Ok(())
}
