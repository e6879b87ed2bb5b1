//! `sctl run` — inject decrypted secrets into a child process.

use std::collections::HashMap;
use std::process::Command;

use tracing::debug;
use zeroize::Zeroize;

use crate::cli::output;
use crate::cli::{envelope_arg, key_or_recorded, open_store, Cli};
use crate::errors::{Result, SctlError};
use crate::kms;

/// Execute the `run` command.
pub fn execute(cli: &Cli, key: Option<&str>, command: &[String]) -> Result<()> {
    if command.is_empty() {
        return Err(SctlError::NoCommandSpecified);
    }

    let (settings, store) = open_store()?;
    let (secrets, recorded) = store.read_secrets(envelope_arg(cli))?;

    let mut env: HashMap<String, String> = HashMap::with_capacity(secrets.len());
    if !secrets.is_empty() {
        let key = key_or_recorded(&settings, key, &recorded)?;
        let backend = kms::from_key_reference(&key)?;

        for secret in &secrets {
            let plaintext = kms::decrypt_secret(backend.as_ref(), secret)?;
            let value = String::from_utf8(plaintext).map_err(|e| {
                let mut bad = e.into_bytes();
                bad.zeroize();
                SctlError::CommandFailed(format!("secret {} is not valid UTF-8", secret.name))
            })?;
            debug!(name = %secret.name, encoding = %secret.encoding, "injecting secret");
            env.insert(secret.name.clone(), value);
        }
    }

    output::success(&format!("Injected {} secrets into environment", env.len()));

    let status = Command::new(&command[0])
        .args(&command[1..])
        .envs(&env)
        .status();

    for value in env.values_mut() {
        value.zeroize();
    }

    match status?.code() {
        Some(0) => Ok(()),
        Some(code) => Err(SctlError::ChildProcessFailed(code)),
        None => Err(SctlError::CommandFailed(
            "child process terminated by signal".into(),
        )),
    }
}
