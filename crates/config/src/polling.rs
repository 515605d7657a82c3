//! Refresh interval configuration.
//!
//! The board re-fetches the task list periodically; pending optimistic moves
//! are reconciled against each fetched list. The default of two minutes
//! matches how long a fetched list is considered fresh.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default refresh interval (2 minutes).
pub const DEFAULT_INTERVAL: u32 = 120;

/// Minimum allowed refresh interval (5 seconds).
pub const MIN_POLLING_INTERVAL: u32 = 5;

/// Maximum allowed refresh interval (1 hour).
pub const MAX_POLLING_INTERVAL: u32 = 3600;

/// Configuration for periodic refreshes.
///
/// # Examples
///
/// ```
/// use tasklane_config::PollingConfig;
///
/// let config = PollingConfig::default();
/// assert_eq!(config.interval_secs, 120);
/// assert!(config.refresh_after_write);
///
/// let config = PollingConfig::with_interval(30);
/// assert_eq!(config.interval().as_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// The refresh interval in seconds.
    #[serde(default = "default_interval")]
    pub interval_secs: u32,

    /// Whether to re-fetch right after a successful write, instead of
    /// waiting for the next periodic refresh.
    #[serde(default = "default_refresh_after_write")]
    pub refresh_after_write: bool,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

fn default_refresh_after_write() -> bool {
    true
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL,
            refresh_after_write: true,
        }
    }
}

impl PollingConfig {
    /// Creates a polling configuration with the specified interval.
    #[must_use]
    pub fn with_interval(interval_secs: u32) -> Self {
        Self {
            interval_secs,
            ..Self::default()
        }
    }

    /// Returns the interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_secs))
    }

    /// Validates the polling configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is outside the allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.interval_secs < MIN_POLLING_INTERVAL {
            return Err(crate::ConfigError::InvalidPollingInterval {
                reason: format!(
                    "interval {} is below minimum of {} seconds",
                    self.interval_secs, MIN_POLLING_INTERVAL
                ),
            });
        }

        if self.interval_secs > MAX_POLLING_INTERVAL {
            return Err(crate::ConfigError::InvalidPollingInterval {
                reason: format!(
                    "interval {} exceeds maximum of {} seconds",
                    self.interval_secs, MAX_POLLING_INTERVAL
                ),
            });
        }

        Ok(())
    }
}
