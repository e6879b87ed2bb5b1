//! `sctl read` — decrypt and print a single secret's value.

use std::io::{self, Write};

use crate::cli::{envelope_arg, key_or_recorded, normalize_secret_name, open_store, Cli};
use crate::errors::Result;
use crate::kms;

/// Execute the `read` command.
pub fn execute(cli: &Cli, name: &str, key: Option<&str>) -> Result<()> {
    let name = normalize_secret_name(name)?;
    let (settings, store) = open_store()?;

    // Lookup first so a missing name fails before the KMS is touched.
    let (secret, recorded) = store.find_secret(&name, envelope_arg(cli))?;
    let key = key_or_recorded(&settings, key, &recorded)?;

    let backend = kms::from_key_reference(&key)?;
    let plaintext = zeroize::Zeroizing::new(kms::decrypt_secret(backend.as_ref(), &secret)?);

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.write_all(b"\n")?;

    Ok(())
}
