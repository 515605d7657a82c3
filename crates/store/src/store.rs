//! The task store contract.

use async_trait::async_trait;
use tasklane_protocol::{NewTask, Task, TaskFilter, TaskId, TaskStats, TaskStatus, TaskUpdate};

use crate::error::Result;

/// Query and mutation access to the authoritative task list.
///
/// Implementations own validation and persistence. The board only reads
/// through [`fetch_tasks`](Self::fetch_tasks) and writes through the
/// mutation methods; it never edits a task it received.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the tasks matching `filter`, newest first.
    async fn fetch_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Returns a single task.
    async fn fetch_task(&self, id: &TaskId) -> Result<Task>;

    /// Creates a task and returns it with its assigned ID.
    async fn create_task(&self, input: NewTask) -> Result<Task>;

    /// Applies a partial update and returns the updated task.
    async fn update_task(&self, id: &TaskId, update: TaskUpdate) -> Result<Task>;

    /// Moves a task to another status.
    async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task> {
        self.update_task(id, TaskUpdate::status(status)).await
    }

    /// Deletes a task.
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Hides a task from the board.
    async fn archive_task(&self, id: &TaskId) -> Result<Task> {
        self.update_task(id, TaskUpdate::archived(true)).await
    }

    /// Puts an archived task back on the board.
    async fn unarchive_task(&self, id: &TaskId) -> Result<Task> {
        self.update_task(id, TaskUpdate::archived(false)).await
    }

    /// Returns per-status counts over all tasks.
    async fn task_stats(&self) -> Result<TaskStats>;
}
