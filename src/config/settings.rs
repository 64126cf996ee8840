//! User settings for the expense tracker
//!
//! Settings live next to the data files as a small JSON document. Every
//! field has a default so a missing or partial file is fine.

use serde::Deserialize;

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// User settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether the interactive menu asks before keeping a new expense
    #[serde(default = "default_confirm_additions")]
    pub confirm_additions: bool,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_confirm_additions() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            confirm_additions: default_confirm_additions(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }
}
