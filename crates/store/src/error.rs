//! Error types for task store operations.

use tasklane_protocol::{ProtocolError, TaskId};

/// Errors that can occur during task store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No task has the given ID.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store rejected the task contents.
    #[error("invalid task: {0}")]
    Invalid(#[from] ProtocolError),

    /// The store could not be reached or refused the request.
    #[error("task store unavailable: {reason}")]
    Unavailable {
        /// A description of why the store is unavailable.
        reason: String,
    },
}

impl StoreError {
    /// Returns `true` if retrying the same request later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// A specialized Result type for task store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
