//! Application settings loading from config.toml
//!
//! The settings file controls the low-stock defaults and lists categories that
//! should exist on startup. Every field has a default, and a missing file is
//! treated the same as an empty one.

use crate::core::stock::{DEFAULT_BOTTOM_PERCENT, DEFAULT_LOW_STOCK_THRESHOLD, LowStockPolicy};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "INVENTORY_CONFIG";

/// Settings file used when [`CONFIG_PATH_ENV`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Low-stock defaults
    #[serde(default)]
    pub stock: StockSettings,
    /// Categories to create on startup when missing
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

/// Low-stock defaults used when a command does not supply its own values.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StockSettings {
    /// Quantities strictly below this are low
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: u32,
    /// Share of products (in percent) reported by the bottom-N view
    #[serde(default = "default_bottom_percent")]
    pub bottom_percent: u32,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            bottom_percent: DEFAULT_BOTTOM_PERCENT,
        }
    }
}

impl StockSettings {
    /// Threshold policy built from the configured threshold.
    #[must_use]
    pub const fn threshold_policy(&self) -> LowStockPolicy {
        LowStockPolicy::Threshold(self.low_stock_threshold)
    }

    /// Percentile policy built from the configured percentage.
    #[must_use]
    pub const fn bottom_policy(&self) -> LowStockPolicy {
        LowStockPolicy::BottomPercent(self.bottom_percent)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.bottom_percent) {
            return Err(Error::Config {
                message: format!(
                    "stock.bottom_percent must be between 1 and 100, got {}",
                    self.bottom_percent
                ),
            });
        }
        Ok(())
    }
}

/// A category to seed into the database
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CategorySeed {
    /// Name of the category
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

const fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

const fn default_bottom_percent() -> u32 {
    DEFAULT_BOTTOM_PERCENT
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML syntax is invalid, a field has the wrong
/// type, or `bottom_percent` is outside 1..=100.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })?;
    settings.stock.validate()?;
    Ok(settings)
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `INVENTORY_CONFIG` (or ./config.toml), using defaults
/// when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_settings(&path)
    } else {
        info!("No settings file at {}, using defaults.", path);
        Ok(Settings::default())
    }
}
