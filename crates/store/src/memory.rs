//! In-memory task store.
//!
//! Keeps tasks in a `Vec` behind a [`tokio::sync::RwLock`]. An optional
//! latency is added to every call to make optimistic updates visible, and
//! writes can be switched to fail for exercising error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tasklane_protocol::{NewTask, Task, TaskFilter, TaskId, TaskStats, TaskUpdate};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::{Result, StoreError};
use crate::store::TaskStore;

/// A [`TaskStore`] that lives in process memory.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::{NewTask, TaskFilter};
/// use tasklane_store::{MemoryStore, TaskStore};
///
/// # async fn example() -> tasklane_store::Result<()> {
/// let store = MemoryStore::new();
/// let task = store.create_task(NewTask::titled("Write docs")).await?;
///
/// let tasks = store.fetch_tasks(&TaskFilter::default()).await?;
/// assert_eq!(tasks[0].id, task.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
    latency: Duration,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store with no latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
            ..Self::default()
        }
    }

    /// Delays every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every write fail with [`StoreError::Unavailable`] while set.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Returns `true` if writes are currently failing.
    #[must_use]
    pub fn fails_writes(&self) -> bool {
        self.fail_writes.load(Ordering::Relaxed)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.fails_writes() {
            return Err(StoreError::Unavailable {
                reason: "writes are disabled".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    #[instrument(skip(self))]
    async fn fetch_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.simulate_latency().await;
        let tasks = self.tasks.read().await;
        let mut matching: Vec<Task> = tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = matching.len(), "fetched tasks");
        Ok(matching)
    }

    async fn fetch_task(&self, id: &TaskId) -> Result<Task> {
        self.simulate_latency().await;
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create_task(&self, input: NewTask) -> Result<Task> {
        self.simulate_latency().await;
        self.check_writable()?;
        let task = input.into_task()?;
        self.tasks.write().await.push(task.clone());
        debug!(task_id = %task.id, "created task");
        Ok(task)
    }

    #[instrument(skip(self, update))]
    async fn update_task(&self, id: &TaskId, update: TaskUpdate) -> Result<Task> {
        self.simulate_latency().await;
        self.check_writable()?;
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        update.apply_to(task)?;
        debug!(status = %task.status, archived = task.is_archived, "updated task");
        Ok(task.clone())
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        self.simulate_latency().await;
        self.check_writable()?;
        let mut tasks = self.tasks.write().await;
        let pos = tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        tasks.remove(pos);
        debug!("deleted task");
        Ok(())
    }

    async fn task_stats(&self) -> Result<TaskStats> {
        self.simulate_latency().await;
        Ok(TaskStats::from_tasks(self.tasks.read().await.iter()))
    }
}
