//! Logging configuration.
//!
//! The terminal belongs to the UI, so logs only go to a file. Without a
//! configured file nothing is logged.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default log filter.
pub const DEFAULT_LEVEL: &str = "info";

/// Where and how much to log.
///
/// `level` accepts anything a tracing env filter does, such as `"debug"` or
/// `"info,tasklane_board=trace"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive.
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file. Logging is disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Returns `true` if a log file is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }
}
