//! `sctl receive` — decrypt a blob produced by `sctl send`.

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::cli::{open_store, require_key};
use crate::errors::Result;
use crate::kms;

/// Execute the `receive` command.
pub fn execute(blob: &str, key: Option<&str>) -> Result<()> {
    let (settings, _) = open_store()?;
    let key = require_key(&settings, key)?;

    let backend = kms::from_key_reference(&key)?;
    let plaintext = Zeroizing::new(kms::decrypt_blob(backend.as_ref(), blob)?);

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.write_all(b"\n")?;

    Ok(())
}
