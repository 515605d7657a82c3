//! Task-related types.
//!
//! This module defines the task record owned by the task store, along with
//! the create and update inputs used to request mutations of it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::status::{TaskPriority, TaskStatus};

/// Unique identifier for a task.
///
/// Identifiers are opaque strings assigned by the store. Freshly generated
/// identifiers are UUID v4 strings.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::TaskId;
///
/// let id = TaskId::from("task-1");
/// assert_eq!(id.as_str(), "task-1");
/// assert_ne!(TaskId::generate(), TaskId::generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates an identifier from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A task on the board.
///
/// Tasks are owned by the task store. The board never mutates a task it
/// received from the store; it only requests mutations.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::{Task, TaskPriority, TaskStatus};
///
/// let task = Task::new("Implement feature X", "Add the new feature");
/// assert_eq!(task.status, TaskStatus::Todo);
/// assert_eq!(task.priority, TaskPriority::Medium);
/// assert!(!task.is_archived);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Longer description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Workflow status, which is also the board column.
    pub status: TaskStatus,
    /// How urgent the task is.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Free-form tags, in insertion order and without duplicates.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this task was created.
    pub created_at: DateTime<Utc>,
    /// Archived tasks are hidden from the board.
    #[serde(default)]
    pub is_archived: bool,
    /// Optional attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Task {
    /// Creates a new task with a generated ID in the `Todo` column.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), title, description)
    }

    /// Creates a new task with a specific ID.
    ///
    /// Useful for testing or when recreating tasks from storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::{Task, TaskId};
    ///
    /// let task = Task::with_id("a", "Test task", "Description");
    /// assert_eq!(task.id, TaskId::from("a"));
    /// ```
    #[must_use]
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            tags: Vec::new(),
            created_at: Utc::now(),
            is_archived: false,
            image_url: None,
        }
    }

    /// Returns the task with its status replaced.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the task with its priority replaced.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the task with the given tags, de-duplicated.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    /// Returns `true` if the task carries the given tag (case-sensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Input for creating a task.
///
/// Mirrors the fields a user fills in; everything except the title has a
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Required, non-blank title.
    pub title: String,
    /// Defaults to empty.
    #[serde(default)]
    pub description: String,
    /// Defaults to `todo`.
    #[serde(default)]
    pub status: TaskStatus,
    /// Defaults to `medium`.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Tags to attach.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewTask {
    /// Creates a create-input with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builds the task record with a fresh ID and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if the title is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::NewTask;
    ///
    /// let task = NewTask::titled("  Write docs ").into_task().unwrap();
    /// assert_eq!(task.title, "Write docs");
    ///
    /// assert!(NewTask::titled("   ").into_task().is_err());
    /// ```
    pub fn into_task(self) -> Result<Task> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ProtocolError::InvalidTaskTitle);
        }
        let mut task = Task::new(title, self.description)
            .with_status(self.status)
            .with_priority(self.priority)
            .with_tags(self.tags);
        task.image_url = self.image_url;
        Ok(task)
    }
}

/// A partial update of a task. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Replacement tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Archive or unarchive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// New image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TaskUpdate {
    /// An update that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An update that only changes the archived flag.
    #[must_use]
    pub fn archived(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Self::default()
        }
    }

    /// Returns `true` if the update carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the set fields to `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTaskTitle`] if a blank title is set.
    /// The task is left untouched in that case.
    pub fn apply_to(self, task: &mut Task) -> Result<()> {
        let title = match self.title {
            Some(title) if title.trim().is_empty() => return Err(ProtocolError::InvalidTaskTitle),
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(tags) = self.tags {
            task.tags = normalize_tags(tags);
        }
        if let Some(is_archived) = self.is_archived {
            task.is_archived = is_archived;
        }
        if let Some(image_url) = self.image_url {
            task.image_url = Some(image_url);
        }
        Ok(())
    }
}

/// Trims tags, drops blank ones and removes duplicates, keeping first
/// occurrences in order.
fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag: String = tag.into();
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
