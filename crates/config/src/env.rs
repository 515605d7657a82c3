//! Environment variable overrides.
//!
//! Environment variables take precedence over every config file.
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `TASKLANE_LOG` | `logging.level` |
//! | `TASKLANE_LOG_FILE` | `logging.file` |
//! | `TASKLANE_REFRESH_SECS` | `polling.interval_secs` |

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Overrides the log filter.
pub const LOG_LEVEL_VAR: &str = "TASKLANE_LOG";

/// Overrides the log file.
pub const LOG_FILE_VAR: &str = "TASKLANE_LOG_FILE";

/// Overrides the refresh interval, in seconds.
pub const REFRESH_SECS_VAR: &str = "TASKLANE_REFRESH_SECS";

/// Applies overrides read through `lookup`.
///
/// Empty values are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if `TASKLANE_REFRESH_SECS` is not
/// a number.
///
/// # Examples
///
/// ```
/// use tasklane_config::Config;
/// use tasklane_config::env::apply_overrides;
///
/// let mut config = Config::default();
/// apply_overrides(&mut config, |name| match name {
///     "TASKLANE_LOG" => Some("debug".to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.logging.level, "debug");
/// ```
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        config.logging.level = level;
    }
    if let Some(file) = lookup(LOG_FILE_VAR) {
        config.logging.file = Some(PathBuf::from(file));
    }
    if let Some(value) = lookup(REFRESH_SECS_VAR) {
        config.polling.interval_secs =
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: REFRESH_SECS_VAR,
                    value,
                })?;
    }
    Ok(())
}

/// Applies overrides from the process environment.
///
/// # Errors
///
/// See [`apply_overrides`].
pub fn apply_process_overrides(config: &mut Config) -> Result<()> {
    apply_overrides(config, |name| std::env::var(name).ok())
}
