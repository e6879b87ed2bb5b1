//! Colored terminal output helpers.
//!
//! All user-facing status output goes through these functions so we get
//! consistent styling across every command. Secret values themselves
//! are printed raw by the commands that reveal them.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::SecretCollection;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of secrets (Name, Encoding, Created), sorted by name.
pub fn print_secrets_table(secrets: &SecretCollection) {
    if secrets.is_empty() {
        info("No secrets in this envelope yet.");
        tip("Run `sctl add <NAME>` to add your first secret.");
        return;
    }

    let mut rows: Vec<_> = secrets.iter().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Encoding", "Created"]);

    for s in rows {
        table.add_row(vec![
            s.name.clone(),
            s.encoding.to_string(),
            s.created.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}
