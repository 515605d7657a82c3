//! Shared protocol types for the tasklane application.
//!
//! This crate defines the core types used across all tasklane components,
//! including tasks, filters, stats, UI messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, the `Task` record, create and update inputs
//! - [`status`]: Workflow statuses (the board columns) and priorities
//! - [`filter`]: Task list filtering
//! - [`stats`]: Per-status counts
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! ```
//! use tasklane_protocol::{NewTask, TaskFilter, TaskPriority, TaskStatus};
//!
//! let task = NewTask {
//!     title: "Implement feature".to_string(),
//!     priority: TaskPriority::High,
//!     ..NewTask::default()
//! }
//! .into_task()
//! .unwrap();
//!
//! assert_eq!(task.status, TaskStatus::Todo);
//! assert!(TaskFilter::default().with_priority(TaskPriority::High).matches(&task));
//! ```

pub mod dummy;
pub mod error;
pub mod filter;
pub mod message;
pub mod stats;
pub mod status;
pub mod task;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use filter::TaskFilter;
pub use message::Message;
pub use stats::TaskStats;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
