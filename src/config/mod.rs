//! Project configuration (`.sctl.toml`).

pub mod settings;

pub use settings::Settings;
