//! User settings for the money tracker
//!
//! Preferences that shape first-run behavior and display.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::currency::{self, BASE_CURRENCY};
use crate::models::DEFAULT_ACCOUNT_NAME;

/// Display date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency for the seed account and for unresolvable export rows
    #[serde(default = "default_currency")]
    pub base_currency: String,

    /// Name of the account created on first run
    #[serde(default = "default_account_name")]
    pub default_account_name: String,

    /// Date format for display (strftime format); CSV dates stay YYYY-MM-DD
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    BASE_CURRENCY.to_string()
}

fn default_account_name() -> String {
    DEFAULT_ACCOUNT_NAME.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_currency: default_currency(),
            default_account_name: default_account_name(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not saved until the caller decides to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if !currency::is_supported(&self.base_currency) {
            return Err(TrackerError::Config(format!(
                "Unsupported base currency '{}'",
                self.base_currency
            )));
        }
        if self.default_account_name.trim().is_empty() {
            return Err(TrackerError::Config(
                "Default account name cannot be empty".into(),
            ));
        }
        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(TrackerError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}
