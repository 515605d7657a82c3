//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the tasklane application.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::BoardConfig;
use crate::env::apply_process_overrides;
use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::polling::PollingConfig;
use crate::store::StoreConfig;

/// The main configuration struct for the tasklane application.
///
/// Every section is optional in a config file and falls back to its
/// defaults.
///
/// # Examples
///
/// ```
/// use tasklane_config::{Config, PollingConfig};
///
/// let config = Config::default();
/// assert_eq!(config.polling.interval_secs, 120);
///
/// let config = Config {
///     polling: PollingConfig::with_interval(30),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Periodic refresh settings.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Optimistic move policies.
    #[serde(default)]
    pub board: BoardConfig,

    /// Task store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations and the
    /// environment.
    ///
    /// Falls back to defaults when no file is found. Environment overrides
    /// are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read
    /// or parsed, if an environment override is malformed, or if the result
    /// fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tasklane_config::Config;
    ///
    /// # fn example() -> tasklane_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Refresh every {} seconds", config.polling.interval_secs);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        apply_process_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_config::{Config, PollingConfig};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.polling = PollingConfig::with_interval(1); // Below minimum
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.polling.validate()?;
        self.store.validate()?;
        Ok(())
    }
}
