//! One module per `sctl` subcommand.

pub mod add;
pub mod completions;
pub mod keygen;
pub mod list;
pub mod read;
pub mod receive;
pub mod rekey;
pub mod rm;
pub mod run;
pub mod send;
pub mod version;
