//! Sample data for demonstration and testing.
//!
//! # Examples
//!
//! ```
//! use tasklane_protocol::dummy::sample_tasks;
//!
//! let tasks = sample_tasks();
//! assert_eq!(tasks.len(), 9);
//! ```

use chrono::{Duration, Utc};

use crate::status::{TaskPriority, TaskStatus};
use crate::task::Task;

/// A builder for creating sample tasks with non-default fields.
struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            task: Task::with_id(id, title, description),
        }
    }

    fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    fn priority(mut self, priority: TaskPriority) -> Self {
        self.task.priority = priority;
        self
    }

    fn tags(mut self, tags: &[&str]) -> Self {
        self.task = self.task.with_tags(tags.iter().copied());
        self
    }

    /// Sets the creation time to `hours` ago so the list has a stable order.
    fn age_hours(mut self, hours: i64) -> Self {
        self.task.created_at = Utc::now() - Duration::hours(hours);
        self
    }

    fn archived(mut self) -> Self {
        self.task.is_archived = true;
        self
    }

    fn build(self) -> Task {
        self.task
    }
}

/// Generates a sample task list spread over all four columns.
///
/// - **To Do**: 3 tasks
/// - **In Progress**: 2 tasks
/// - **Code Review**: 1 task
/// - **Done**: 2 tasks
/// - one archived task
///
/// Tasks are returned newest first, like a store query.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::dummy::sample_tasks;
/// use tasklane_protocol::{TaskStats, TaskStatus};
///
/// let stats = TaskStats::from_tasks(&sample_tasks());
/// assert_eq!(stats.count(TaskStatus::Todo), 3);
/// assert_eq!(stats.count(TaskStatus::InProgress), 2);
/// assert_eq!(stats.archived, 1);
/// ```
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        TaskBuilder::new(
            "sample-1",
            "Set up CI pipeline",
            "Run tests, clippy and fmt on every push.",
        )
        .priority(TaskPriority::High)
        .tags(&["infra", "ci"])
        .age_hours(1)
        .build(),
        TaskBuilder::new(
            "sample-2",
            "Write API documentation",
            "Document every public endpoint with examples.",
        )
        .priority(TaskPriority::Low)
        .tags(&["docs"])
        .age_hours(2)
        .build(),
        TaskBuilder::new(
            "sample-3",
            "Add tag filter to board",
            "Only show tasks carrying all selected tags.",
        )
        .tags(&["frontend"])
        .age_hours(3)
        .build(),
        TaskBuilder::new(
            "sample-4",
            "Optimistic drag and drop",
            "Cards move immediately and settle when the store confirms.",
        )
        .status(TaskStatus::InProgress)
        .priority(TaskPriority::Critical)
        .tags(&["frontend", "board"])
        .age_hours(5)
        .build(),
        TaskBuilder::new(
            "sample-5",
            "Fix stale task counts",
            "Stats header does not refresh after archiving.",
        )
        .status(TaskStatus::InProgress)
        .priority(TaskPriority::High)
        .tags(&["bug"])
        .age_hours(8)
        .build(),
        TaskBuilder::new(
            "sample-6",
            "Image attachments",
            "Allow attaching a screenshot to a task.",
        )
        .status(TaskStatus::CodeReview)
        .tags(&["backend"])
        .age_hours(24)
        .build(),
        TaskBuilder::new(
            "sample-7",
            "Project setup",
            "Workspace layout and crate structure.",
        )
        .status(TaskStatus::Done)
        .priority(TaskPriority::Low)
        .age_hours(48)
        .build(),
        TaskBuilder::new(
            "sample-8",
            "Task creation form",
            "Title, description, priority and tags.",
        )
        .status(TaskStatus::Done)
        .tags(&["frontend"])
        .age_hours(72)
        .build(),
        TaskBuilder::new(
            "sample-9",
            "Evaluate hosted database",
            "Superseded by the in-memory store for now.",
        )
        .status(TaskStatus::Done)
        .archived()
        .age_hours(96)
        .build(),
    ]
}
