//! Background task that talks to the task store.
//!
//! The UI loop never awaits the store. It sends [`StoreCommand`]s to a
//! worker spawned on the runtime and drains the resulting [`StoreEvent`]s
//! between frames. The worker also refreshes periodically, which is how
//! pending optimistic moves get reconciled even when nothing is clicked.

use std::sync::Arc;

use tasklane_config::PollingConfig;
use tasklane_protocol::{NewTask, Task, TaskFilter, TaskId, TaskStats, TaskStatus, TaskUpdate};
use tasklane_store::TaskStore;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Requests sent from the UI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Fetch tasks matching the filter, and stats. The filter is kept for
    /// later periodic refreshes.
    Refresh(TaskFilter),
    /// Move a task to another status.
    UpdateStatus {
        /// The task to move.
        task_id: TaskId,
        /// The new status.
        status: TaskStatus,
    },
    /// Create a task.
    Create(NewTask),
    /// Apply a partial update to a task, other than a move.
    Edit {
        /// The task to change.
        task_id: TaskId,
        /// The fields to change.
        update: TaskUpdate,
    },
    /// Delete a task for good.
    Delete(TaskId),
    /// Archive a task.
    Archive(TaskId),
    /// Put an archived task back on the board.
    Unarchive(TaskId),
    /// Stop the worker.
    Shutdown,
}

/// Which request a [`StoreEvent::Failed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedRequest {
    /// Fetching tasks or stats.
    Fetch,
    /// A move to the given status.
    StatusUpdate(TaskStatus),
    /// Creating a task.
    Create,
    /// Editing a task.
    Edit,
    /// Deleting a task.
    Delete,
    /// An archive request.
    Archive,
    /// An unarchive request.
    Unarchive,
}

impl FailedRequest {
    /// The action named in error messages.
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            Self::Fetch => "Refresh",
            Self::StatusUpdate(_) => "Move",
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Archive => "Archive",
            Self::Unarchive => "Restore",
        }
    }
}

/// Results sent from the worker back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A freshly fetched task list.
    Tasks(Vec<Task>),
    /// Freshly computed stats.
    Stats(TaskStats),
    /// A status update was stored.
    Updated(Task),
    /// A task was created.
    Created(Task),
    /// A task was edited.
    Edited(Task),
    /// A task was deleted. Carries the task as it was.
    Deleted(Task),
    /// A task was archived.
    Archived(Task),
    /// A task was put back on the board.
    Unarchived(Task),
    /// A request failed.
    Failed {
        /// What was requested.
        request: FailedRequest,
        /// The task concerned, for writes.
        task_id: Option<TaskId>,
        /// The store error, rendered.
        message: String,
    },
}

/// The UI's handle on a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    /// Sends commands to the worker.
    pub commands: UnboundedSender<StoreCommand>,
    /// Receives the worker's results.
    pub events: UnboundedReceiver<StoreEvent>,
    /// Completes when the worker stops.
    pub join: JoinHandle<()>,
}

/// Spawns a worker on the current Tokio runtime.
///
/// The first refresh happens immediately, with an unrestricted filter.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tasklane_config::PollingConfig;
/// use tasklane_protocol::dummy::sample_tasks;
/// use tasklane_store::MemoryStore;
/// use tasklane_tui::worker::{StoreCommand, StoreEvent, spawn_worker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = Arc::new(MemoryStore::with_tasks(sample_tasks()));
/// let mut handle = spawn_worker(store, &PollingConfig::default());
///
/// let event = handle.events.recv().await;
/// assert!(matches!(event, Some(StoreEvent::Tasks(_))));
///
/// handle.commands.send(StoreCommand::Shutdown).unwrap();
/// handle.join.await.unwrap();
/// # }
/// ```
#[must_use]
pub fn spawn_worker(store: Arc<dyn TaskStore>, polling: &PollingConfig) -> WorkerHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let worker = StoreWorker {
        store,
        events: event_tx,
        polling: polling.clone(),
        filter: TaskFilter::default(),
    };
    let join = tokio::spawn(worker.run(command_rx));

    WorkerHandle {
        commands: command_tx,
        events: event_rx,
        join,
    }
}

struct StoreWorker {
    store: Arc<dyn TaskStore>,
    events: UnboundedSender<StoreEvent>,
    polling: PollingConfig,
    filter: TaskFilter,
}

impl StoreWorker {
    async fn run(mut self, mut commands: UnboundedReceiver<StoreCommand>) {
        let mut ticker = tokio::time::interval(self.polling.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.polling.interval_secs, "store worker started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(StoreCommand::Shutdown) | None => break,
                    Some(command) => self.handle(command).await,
                },
                _ = ticker.tick() => self.refresh().await,
            }
            if self.events.is_closed() {
                break;
            }
        }

        info!("store worker stopped");
    }

    async fn handle(&mut self, command: StoreCommand) {
        debug!(?command, "store command");
        match command {
            StoreCommand::Refresh(filter) => {
                self.filter = filter;
                self.refresh().await;
            }
            StoreCommand::UpdateStatus { task_id, status } => {
                let result = self.store.update_task_status(&task_id, status).await;
                self.finish_write(result, StoreEvent::Updated, || {
                    (FailedRequest::StatusUpdate(status), task_id)
                })
                .await;
            }
            StoreCommand::Create(input) => {
                let result = self.store.create_task(input).await;
                match result {
                    Ok(task) => {
                        info!(task_id = %task.id, "task created");
                        self.emit(StoreEvent::Created(task));
                        self.refresh_after_write().await;
                    }
                    Err(err) => {
                        warn!(error = %err, "create failed");
                        self.fail(FailedRequest::Create, None, &err);
                    }
                }
            }
            StoreCommand::Edit { task_id, update } => {
                let result = self.store.update_task(&task_id, update).await;
                self.finish_write(result, StoreEvent::Edited, || (FailedRequest::Edit, task_id))
                    .await;
            }
            StoreCommand::Delete(task_id) => {
                // Fetched first so the UI can name what it lost.
                let result = match self.store.fetch_task(&task_id).await {
                    Ok(task) => self.store.delete_task(&task_id).await.map(|()| task),
                    Err(err) => Err(err),
                };
                self.finish_write(result, StoreEvent::Deleted, || (FailedRequest::Delete, task_id))
                    .await;
            }
            StoreCommand::Archive(task_id) => {
                let result = self.store.archive_task(&task_id).await;
                self.finish_write(result, StoreEvent::Archived, || {
                    (FailedRequest::Archive, task_id)
                })
                .await;
            }
            StoreCommand::Unarchive(task_id) => {
                let result = self.store.unarchive_task(&task_id).await;
                self.finish_write(result, StoreEvent::Unarchived, || {
                    (FailedRequest::Unarchive, task_id)
                })
                .await;
            }
            StoreCommand::Shutdown => {}
        }
    }

    /// Reports the outcome of a write on an existing task.
    async fn finish_write(
        &self,
        result: tasklane_store::Result<Task>,
        done: impl FnOnce(Task) -> StoreEvent,
        failed: impl FnOnce() -> (FailedRequest, TaskId),
    ) {
        match result {
            Ok(task) => {
                debug!(task_id = %task.id, "write stored");
                self.emit(done(task));
                self.refresh_after_write().await;
            }
            Err(err) => {
                let (request, task_id) = failed();
                warn!(task_id = %task_id, ?request, error = %err, "write failed");
                self.fail(request, Some(task_id), &err);
            }
        }
    }

    async fn refresh_after_write(&self) {
        if self.polling.refresh_after_write {
            self.refresh().await;
        }
    }

    async fn refresh(&self) {
        match self.store.fetch_tasks(&self.filter).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), filter = %self.filter.describe(), "fetched tasks");
                self.emit(StoreEvent::Tasks(tasks));
            }
            Err(err) => {
                warn!(error = %err, "fetching tasks failed");
                self.fail(FailedRequest::Fetch, None, &err);
                return;
            }
        }
        match self.store.task_stats().await {
            Ok(stats) => self.emit(StoreEvent::Stats(stats)),
            Err(err) => {
                warn!(error = %err, "fetching stats failed");
                self.fail(FailedRequest::Fetch, None, &err);
            }
        }
    }

    fn fail(&self, request: FailedRequest, task_id: Option<TaskId>, err: &impl ToString) {
        self.emit(StoreEvent::Failed {
            request,
            task_id,
            message: err.to_string(),
        });
    }

    fn emit(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}
