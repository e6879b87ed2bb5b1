//! `sctl version` — display version and envelope format.

use console::style;

use crate::errors::Result;
use crate::vault::CURRENT_VERSION;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!("sctl {}", env!("CARGO_PKG_VERSION"));
    println!(
        "{}",
        style(format!("envelope format v{CURRENT_VERSION}")).dim()
    );
    Ok(())
}
