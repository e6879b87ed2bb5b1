//! `sctl rm` — remove a secret from the envelope.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{envelope_arg, normalize_secret_name, open_store, Cli};
use crate::errors::{Result, SctlError};

/// Execute the `rm` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let name = normalize_secret_name(name)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove secret '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| SctlError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (_, store) = open_store()?;
    if store.delete_secret(&name, envelope_arg(cli))? {
        output::success(&format!("Removed secret '{name}'"));
    } else {
        output::info(&format!("Secret '{name}' was not in the envelope"));
    }

    Ok(())
}
