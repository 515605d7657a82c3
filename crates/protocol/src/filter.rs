//! Task list filtering.

use serde::{Deserialize, Serialize};

use crate::status::{TaskPriority, TaskStatus};
use crate::task::Task;

/// Criteria for selecting tasks from the store.
///
/// An empty filter matches every non-archived task.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::{Task, TaskFilter, TaskPriority};
///
/// let filter = TaskFilter::default().with_priority(TaskPriority::High);
/// let task = Task::new("Fix crash", "").with_priority(TaskPriority::High);
/// assert!(filter.matches(&task));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Only tasks in this status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Tasks must carry every one of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Select archived tasks instead of live ones.
    #[serde(default)]
    pub archived: bool,
}

impl TaskFilter {
    /// Restricts the filter to a status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to a priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a required tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Selects archived tasks.
    #[must_use]
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Returns `true` if no status, priority or tag criterion is set.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.tags.is_empty()
    }

    /// Returns `true` if `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.is_archived == self.archived
            && self.status.is_none_or(|status| task.status == status)
            && self.priority.is_none_or(|priority| task.priority == priority)
            && self.tags.iter().all(|tag| task.has_tag(tag))
    }

    /// Short description of the active criteria for status lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::{TaskFilter, TaskPriority, TaskStatus};
    ///
    /// assert_eq!(TaskFilter::default().describe(), "all tasks");
    /// let filter = TaskFilter::default()
    ///     .with_status(TaskStatus::Done)
    ///     .with_priority(TaskPriority::Low);
    /// assert_eq!(filter.describe(), "status: Done, priority: Low");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status: {}", status.display_name()));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("priority: {}", priority.display_name()));
        }
        if !self.tags.is_empty() {
            parts.push(format!("tags: {}", self.tags.join(", ")));
        }
        if self.archived {
            parts.push("archived".to_string());
        }
        if parts.is_empty() {
            "all tasks".to_string()
        } else {
            parts.join(", ")
        }
    }
}
