//! Task store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default simulated latency of the in-memory store, in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 150;

/// Maximum allowed simulated latency (10 seconds).
pub const MAX_LATENCY_MS: u64 = 10_000;

/// Configuration of the task store.
///
/// # Examples
///
/// ```
/// use tasklane_config::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.latency().as_millis(), 150);
/// assert!(config.seed_sample_tasks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Delay added to every store call, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Fill an empty store with sample tasks on startup.
    #[serde(default = "default_seed_sample_tasks")]
    pub seed_sample_tasks: bool,
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY_MS
}

fn default_seed_sample_tasks() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            seed_sample_tasks: true,
        }
    }
}

impl StoreConfig {
    /// Returns the latency as a [`Duration`].
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Validates the store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency exceeds [`MAX_LATENCY_MS`].
    pub fn validate(&self) -> crate::Result<()> {
        if self.latency_ms > MAX_LATENCY_MS {
            return Err(crate::ConfigError::InvalidLatency {
                reason: format!(
                    "latency {} ms exceeds maximum of {} ms",
                    self.latency_ms, MAX_LATENCY_MS
                ),
            });
        }
        Ok(())
    }
}
