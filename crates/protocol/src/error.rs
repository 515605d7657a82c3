//! Error types for the tasklane-protocol crate.
//!
//! This module defines the errors that can occur when parsing or validating
//! protocol types.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A status name did not match any of the four workflow statuses.
    #[error("unknown task status: {0:?}")]
    UnknownStatus(String),

    /// A priority name did not match any known priority.
    #[error("unknown task priority: {0:?}")]
    UnknownPriority(String),

    /// A task title was empty or only whitespace.
    #[error("invalid task title: title cannot be empty")]
    InvalidTaskTitle,
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
