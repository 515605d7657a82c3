//! Board behavior configuration.

use serde::{Deserialize, Serialize};

/// How the board treats optimistic moves the store disagrees with.
///
/// Both options default to `false`: an override stays on screen until a
/// refresh shows the store has caught up or the task is gone.
///
/// # Examples
///
/// ```
/// use tasklane_config::BoardConfig;
///
/// let config: BoardConfig = serde_json5::from_str("{ rollback_on_failure: true }").unwrap();
/// assert!(config.rollback_on_failure);
/// assert!(!config.drop_diverged_overrides);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Drop an override when the store reports a status that is neither
    /// the one dragged from nor the one dropped into.
    pub drop_diverged_overrides: bool,

    /// Drop an override as soon as the store reports the update failed.
    pub rollback_on_failure: bool,
}
