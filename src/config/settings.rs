use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SctlError};
use crate::vault::DEFAULT_ENVELOPE_FILE;

/// Project-level configuration, loaded from `.sctl.toml`.
///
/// Every field has a default so sctl works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Envelope filename used when no path, or a directory, is given.
    #[serde(default = "default_envelope_file")]
    pub envelope_file: String,

    /// Key reference used when neither `--key` nor `SCTL_KEY` is set.
    #[serde(default)]
    pub key: Option<String>,
}

fn default_envelope_file() -> String {
    DEFAULT_ENVELOPE_FILE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            envelope_file: default_envelope_file(),
            key: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".sctl.toml";

    /// Load settings from `<project_dir>/.sctl.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            SctlError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Pick the key reference: an explicit value wins over the config.
    pub fn key_reference(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.key.clone().filter(|k| !k.is_empty()))
    }
}
