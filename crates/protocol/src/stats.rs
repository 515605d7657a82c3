//! Board-wide task counts.

use serde::{Deserialize, Serialize};

use crate::status::TaskStatus;
use crate::task::Task;

/// Counts of tasks per status.
///
/// `total` and the per-status counts only include live tasks; archived tasks
/// are counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Number of live tasks.
    pub total: usize,
    /// Live tasks in `todo`.
    pub todo: usize,
    /// Live tasks in `in_progress`.
    pub in_progress: usize,
    /// Live tasks in `code_review`.
    pub code_review: usize,
    /// Live tasks in `done`.
    pub done: usize,
    /// Archived tasks, regardless of status.
    pub archived: usize,
}

impl TaskStats {
    /// Computes stats over a task list.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::{Task, TaskStats, TaskStatus};
    ///
    /// let mut archived = Task::new("Old", "");
    /// archived.is_archived = true;
    /// let tasks = vec![
    ///     Task::new("A", ""),
    ///     Task::new("B", "").with_status(TaskStatus::Done),
    ///     archived,
    /// ];
    ///
    /// let stats = TaskStats::from_tasks(&tasks);
    /// assert_eq!(stats.total, 2);
    /// assert_eq!(stats.done, 1);
    /// assert_eq!(stats.archived, 1);
    /// ```
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            if task.is_archived {
                stats.archived += 1;
                continue;
            }
            stats.total += 1;
            match task.status {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::CodeReview => stats.code_review += 1,
                TaskStatus::Done => stats.done += 1,
            }
        }
        stats
    }

    /// Returns the live count for a status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::CodeReview => self.code_review,
            TaskStatus::Done => self.done,
        }
    }

    /// Returns `count` as a whole percentage of `total`, rounded to nearest.
    ///
    /// Returns 0 when there are no live tasks.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::TaskStats;
    ///
    /// let stats = TaskStats { total: 3, ..TaskStats::default() };
    /// assert_eq!(stats.percentage_of_total(1), 33);
    /// assert_eq!(stats.percentage_of_total(2), 67);
    /// assert_eq!(TaskStats::default().percentage_of_total(5), 0);
    /// ```
    #[must_use]
    pub const fn percentage_of_total(&self, count: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        (count * 200 + self.total) / (self.total * 2)
    }
}
