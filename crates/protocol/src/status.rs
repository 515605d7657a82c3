//! Workflow status and priority enums.
//!
//! [`TaskStatus`] doubles as the column key of the board: the four statuses
//! are the four fixed columns, in workflow order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// The workflow stage of a task.
///
/// The order reflects the typical progression of work and is the order in
/// which the board lays out its columns.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::TaskStatus;
///
/// let status = TaskStatus::CodeReview;
/// assert_eq!(status.display_name(), "Code Review");
/// assert_eq!(status.as_str(), "code_review");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting for a code review.
    CodeReview,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns all statuses in workflow order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::TaskStatus;
    ///
    /// let all = TaskStatus::all();
    /// assert_eq!(all.len(), 4);
    /// assert_eq!(all[0], TaskStatus::Todo);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Todo, Self::InProgress, Self::CodeReview, Self::Done]
    }

    /// Returns a human-readable name for the status.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::CodeReview => "Code Review",
            Self::Done => "Done",
        }
    }

    /// Returns the wire name of the status (`"in_progress"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::CodeReview => "code_review",
            Self::Done => "done",
        }
    }

    /// Returns the index of this status in the workflow (0-3).
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.index(), 0);
    /// assert_eq!(TaskStatus::Done.index(), 3);
    /// ```
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::CodeReview => 2,
            Self::Done => 3,
        }
    }

    /// Creates a `TaskStatus` from its index.
    ///
    /// Returns `None` if the index is out of range (>= 4).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::InProgress),
            2 => Some(Self::CodeReview),
            3 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the next status in the workflow, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.next(), Some(TaskStatus::InProgress));
    /// assert_eq!(TaskStatus::Done.next(), None);
    /// ```
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the previous status in the workflow, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(idx) => Self::from_index(idx),
            None => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownStatus(s.to_string()))
    }
}

/// How urgent a task is.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::TaskPriority;
///
/// assert_eq!(TaskPriority::default(), TaskPriority::Medium);
/// assert!(TaskPriority::Critical > TaskPriority::Low);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// The usual.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Critical,
}

impl TaskPriority {
    /// Returns all priorities from lowest to highest.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// Returns a human-readable name for the priority.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Returns the wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownPriority(s.to_string()))
    }
}
