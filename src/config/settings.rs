//! Service settings loaded from helpdesk.toml
//!
//! Every field has a default, so a missing file simply yields
//! [`Settings::default`]. A present but malformed file is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error, info};

const DEFAULT_SETTINGS_PATH: &str = "helpdesk.toml";
const DEFAULT_AUTO_CLOSE_AFTER_DAYS: i64 = 2;
const MAX_AUTO_CLOSE_AFTER_DAYS: i64 = 36_500;

/// Configuration structure representing the entire helpdesk.toml file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// In-progress tickets without customer activity for this many days are closed
    pub auto_close_after_days: i64,
    /// Role names created at startup if missing
    pub seed_roles: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_close_after_days: DEFAULT_AUTO_CLOSE_AFTER_DAYS,
            seed_roles: Vec::new(),
        }
    }
}

impl Settings {
    /// Inactivity window for the auto-close sweep.
    #[must_use]
    pub fn inactivity_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.auto_close_after_days)
    }

    fn validate(self) -> Result<Self> {
        if !(1..=MAX_AUTO_CLOSE_AFTER_DAYS).contains(&self.auto_close_after_days) {
            return Err(Error::Config {
                message: format!(
                    "auto_close_after_days must be in 1..={MAX_AUTO_CLOSE_AFTER_DAYS}, got {}",
                    self.auto_close_after_days
                ),
            });
        }
        Ok(self)
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - `auto_close_after_days` is outside 1..=36500
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("No settings file at {:?}, using defaults", path_ref);
        return Ok(Settings::default());
    }

    debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)
        .inspect_err(|e| error!("Failed to read settings file {:?}: {}", path_ref, e))?;

    parse_settings(&contents)
}

/// Loads settings from `HELPDESK_CONFIG`, or ./helpdesk.toml when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path =
        std::env::var("HELPDESK_CONFIG").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    load_settings(path)
}

fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse helpdesk.toml: {e}"),
    })?;
    settings.validate()
}
