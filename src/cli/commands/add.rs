//! `sctl add` — encrypt a value and upsert it into the envelope.

use crate::cli::output;
use crate::cli::{envelope_arg, normalize_secret_name, open_store, read_value, require_key, Cli};
use crate::errors::Result;
use crate::kms;
use crate::vault::{Encoding, Secret};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    name: &str,
    value: Option<&str>,
    key: Option<&str>,
    no_decode: bool,
    skip_key_check: bool,
) -> Result<()> {
    let name = normalize_secret_name(name)?;
    let (settings, store) = open_store()?;
    let key = require_key(&settings, key)?;

    let plaintext = read_value(value, &format!("Enter value for {name}"))?;

    let encoding = if no_decode {
        Encoding::Plain
    } else {
        Encoding::Base64
    };

    let backend = kms::from_key_reference(&key)?;
    let cypher = kms::encrypt_value(backend.as_ref(), &plaintext, encoding)?;

    let envelope_path = envelope_arg(cli);
    let rotated = store.add_secret(
        Secret::new(name.as_str(), cypher, encoding),
        &key,
        !skip_key_check,
        envelope_path,
    )?;

    let target = store.locate(envelope_path);
    if rotated {
        output::success(&format!("Secret '{name}' rotated in {}", target.display()));
    } else {
        output::success(&format!("Secret '{name}' added to {}", target.display()));
    }

    Ok(())
}
