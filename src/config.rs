//! Configuration file handling.
//!
//! This module provides loading and saving of crxlist configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/crxlist/config.toml`
//! - macOS: `~/Library/Application Support/crxlist/config.toml`
//! - Windows: `%APPDATA%\crxlist\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "lines"
//! sort_entries = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;
use crate::platform::config_dir;
use crate::scanner::ScanOptions;

/// Application configuration.
///
/// Every field has a default, so a missing file or a partial file is fine.
///
/// # Example
///
/// ```no_run
/// use crxlist::Config;
///
/// let config = Config::load().unwrap();
/// println!("Format: {:?}", config.default_format);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "lines", "json", "table"
    /// Default: "lines"
    pub default_format: OutputFormat,

    /// Visit extension folders and manifests in file name order.
    ///
    /// Default: false (directory listing order)
    pub sort_entries: bool,
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Saves the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Scan options derived from this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            sorted: self.sort_entries,
        }
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}
