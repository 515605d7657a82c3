//! Column partitioning.
//!
//! Groups a flat task list into the four fixed board columns, one per
//! [`TaskStatus`].

use tasklane_protocol::{Task, TaskId, TaskStatus};

/// The four board columns, each holding the tasks of one status in order.
///
/// Archived tasks are not visible and never appear in any column. Because a
/// task carries exactly one [`TaskStatus`], the columns are always pairwise
/// disjoint.
///
/// # Examples
///
/// ```
/// use tasklane_board::Columns;
/// use tasklane_protocol::{Task, TaskId, TaskStatus};
///
/// let tasks = vec![
///     Task::with_id("a", "A", ""),
///     Task::with_id("b", "B", "").with_status(TaskStatus::Done),
///     Task::with_id("c", "C", ""),
/// ];
///
/// let columns = Columns::partition(tasks);
/// assert_eq!(
///     columns.ids(TaskStatus::Todo),
///     vec![TaskId::from("a"), TaskId::from("c")]
/// );
/// assert_eq!(columns.column(TaskStatus::Done).len(), 1);
/// assert!(columns.column(TaskStatus::InProgress).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    columns: [Vec<Task>; 4],
}

impl Columns {
    /// Groups tasks by status, preserving input order within each column.
    #[must_use]
    pub fn partition(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns = Self::default();
        for task in tasks.into_iter().filter(|t| !t.is_archived) {
            columns.columns[task.status.index()].push(task);
        }
        columns
    }

    /// Returns the tasks of one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        &self.columns[status.index()]
    }

    /// Returns the IDs of one column, in display order.
    #[must_use]
    pub fn ids(&self, status: TaskStatus) -> Vec<TaskId> {
        self.column(status).iter().map(|t| t.id.clone()).collect()
    }

    /// Returns the column a task is displayed in, if it is on the board.
    #[must_use]
    pub fn column_of(&self, id: &TaskId) -> Option<TaskStatus> {
        self.position(id).map(|(status, _)| status)
    }

    /// Returns the column and index of a task, if it is on the board.
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<(TaskStatus, usize)> {
        self.iter().find_map(|(status, tasks)| {
            tasks
                .iter()
                .position(|t| &t.id == id)
                .map(|index| (status, index))
        })
    }

    /// Looks up a task on the board.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.columns.iter().flatten().find(|t| &t.id == id)
    }

    /// Total number of visible tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no task is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Iterates over the columns in workflow order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::all()
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Replaces the contents of one column through `f`.
    ///
    /// `f` must return tasks of that same status.
    pub(crate) fn rearrange(
        &mut self,
        status: TaskStatus,
        f: impl FnOnce(Vec<Task>) -> Vec<Task>,
    ) {
        let slot = &mut self.columns[status.index()];
        *slot = f(std::mem::take(slot));
        debug_assert!(slot.iter().all(|t| t.status == status));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task::with_id(id, id.to_uppercase(), "").with_status(status)
    }

    #[test]
    fn partition_preserves_input_order() {
        let columns = Columns::partition(vec![
            task("c", TaskStatus::Todo),
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Todo),
        ]);
        assert_eq!(
            columns.ids(TaskStatus::Todo),
            vec![TaskId::from("c"), TaskId::from("a"), TaskId::from("b")]
        );
    }

    #[test]
    fn archived_tasks_are_hidden() {
        let mut archived = task("a", TaskStatus::Done);
        archived.is_archived = true;
        let columns = Columns::partition(vec![archived, task("b", TaskStatus::Done)]);

        assert_eq!(columns.len(), 1);
        assert!(columns.get(&TaskId::from("a")).is_none());
        assert_eq!(columns.column_of(&TaskId::from("a")), None);
    }

    #[test]
    fn lookup_by_id() {
        let columns = Columns::partition(vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::CodeReview),
            task("c", TaskStatus::CodeReview),
        ]);

        assert_eq!(
            columns.position(&TaskId::from("c")),
            Some((TaskStatus::CodeReview, 1))
        );
        assert_eq!(
            columns.column_of(&TaskId::from("a")),
            Some(TaskStatus::Todo)
        );
        assert_eq!(
            columns.get(&TaskId::from("b")).map(|t| t.title.as_str()),
            Some("B")
        );
        assert_eq!(columns.position(&TaskId::from("zzz")), None);
    }

    #[test]
    fn empty_input_gives_empty_columns() {
        let columns = Columns::partition(Vec::new());
        assert!(columns.is_empty());
        assert_eq!(columns.iter().count(), 4);
    }

    #[test]
    fn iter_follows_workflow_order() {
        let statuses: Vec<_> = Columns::default().iter().map(|(s, _)| s).collect();
        assert_eq!(statuses, TaskStatus::all().to_vec());
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((0..4usize, any::<bool>()), 0..40).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (status, archived))| {
                    let status = TaskStatus::from_index(status).unwrap_or_default();
                    let mut t = task(&format!("t{i}"), status);
                    t.is_archived = archived;
                    t
                })
                .collect()
        })
    }

    proptest! {
        /// Columns are pairwise disjoint and cover exactly the visible tasks.
        #[test]
        fn partition_is_disjoint_and_complete(tasks in arb_tasks()) {
            let visible: HashSet<TaskId> = tasks
                .iter()
                .filter(|t| !t.is_archived)
                .map(|t| t.id.clone())
                .collect();

            let columns = Columns::partition(tasks);

            let mut seen = HashSet::new();
            for (status, column) in columns.iter() {
                for task in column {
                    prop_assert_eq!(task.status, status);
                    prop_assert!(seen.insert(task.id.clone()), "{} appears twice", task.id);
                }
            }
            prop_assert_eq!(seen, visible);
        }
    }
}
