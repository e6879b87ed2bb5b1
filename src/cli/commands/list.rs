//! `sctl list` — display all secrets in a table.

use crate::cli::output;
use crate::cli::{envelope_arg, open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_, store) = open_store()?;
    let envelope_path = envelope_arg(cli);

    let (secrets, key) = store.read_secrets(envelope_path)?;

    output::info(&format!(
        "{} — {} secret(s)",
        store.locate(envelope_path).display(),
        secrets.len()
    ));
    if key.is_empty() && !secrets.is_empty() {
        output::warning("Envelope has no recorded key; the next `sctl add` will record one.");
    }

    output::print_secrets_table(&secrets);

    Ok(())
}
