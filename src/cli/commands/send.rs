//! `sctl send` — encrypt a value into a standalone blob.
//!
//! Nothing is written to the envelope. The printed blob can be pasted to
//! anyone holding decrypt rights on the same key, who recovers it with
//! `sctl receive`.

use crate::cli::output;
use crate::cli::{open_store, read_value, require_key};
use crate::errors::Result;
use crate::kms;
use crate::vault::Encoding;

/// Execute the `send` command.
pub fn execute(value: Option<&str>, key: Option<&str>) -> Result<()> {
    let (settings, _) = open_store()?;
    let key = require_key(&settings, key)?;

    let plaintext = read_value(value, "Enter value to send")?;

    let backend = kms::from_key_reference(&key)?;
    let blob = kms::encrypt_value(backend.as_ref(), &plaintext, Encoding::Plain)?;

    println!("{blob}");
    output::tip(&format!("Recipient runs: sctl receive --key={key} {blob}"));

    Ok(())
}
