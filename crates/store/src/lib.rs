//! Task store for tasklane.
//!
//! The store owns the authoritative task list. This crate defines the
//! [`TaskStore`] contract the board talks to and ships [`MemoryStore`], an
//! in-process implementation with optional simulated latency.
//!
//! # Overview
//!
//! - [`TaskStore`]: async query and mutation interface
//! - [`MemoryStore`]: in-memory implementation
//! - [`StoreError`]: Error types for store operations
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use tasklane_protocol::{TaskId, TaskStatus, dummy::sample_tasks};
//! use tasklane_store::{MemoryStore, TaskStore};
//!
//! # async fn example() -> tasklane_store::Result<()> {
//! let store: Arc<dyn TaskStore> = Arc::new(
//!     MemoryStore::with_tasks(sample_tasks()).with_latency(Duration::from_millis(150)),
//! );
//!
//! let task = store
//!     .update_task_status(&TaskId::from("sample-1"), TaskStatus::InProgress)
//!     .await?;
//! assert_eq!(task.status, TaskStatus::InProgress);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use store::TaskStore;
