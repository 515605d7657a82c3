//! Manual ordering within a column.
//!
//! Tasks have no stored position, so an ordering chosen by dragging inside a
//! column lives here, in memory, until a task enters or leaves that column.

use std::collections::{HashMap, HashSet};

use tasklane_protocol::{Task, TaskId, TaskStatus};

/// Remembered per-column task orderings.
///
/// # Examples
///
/// ```
/// use tasklane_board::LocalReorder;
/// use tasklane_protocol::{Task, TaskId, TaskStatus};
///
/// let mut reorder = LocalReorder::default();
/// reorder.set_order(TaskStatus::Todo, vec![TaskId::from("b"), TaskId::from("gone")]);
///
/// let tasks = vec![Task::with_id("a", "A", ""), Task::with_id("b", "B", "")];
/// let ordered = reorder.materialize(TaskStatus::Todo, tasks);
///
/// let ids: Vec<_> = ordered.iter().map(|t| t.id.as_str()).collect();
/// assert_eq!(ids, ["b", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalReorder {
    orders: HashMap<TaskStatus, Vec<TaskId>>,
}

impl LocalReorder {
    /// Replaces the remembered ordering of a column.
    pub fn set_order(&mut self, column: TaskStatus, ids: Vec<TaskId>) {
        self.orders.insert(column, ids);
    }

    /// Forgets the ordering of a column.
    pub fn clear(&mut self, column: TaskStatus) -> Option<Vec<TaskId>> {
        self.orders.remove(&column)
    }

    /// Returns the remembered ordering of a column.
    #[must_use]
    pub fn order(&self, column: TaskStatus) -> Option<&[TaskId]> {
        self.orders.get(&column).map(Vec::as_slice)
    }

    /// Drops remembered IDs that `keep` rejects, and orderings left empty.
    pub fn retain_tasks(&mut self, mut keep: impl FnMut(&TaskId) -> bool) {
        self.orders.retain(|_, ids| {
            ids.retain(|id| keep(id));
            !ids.is_empty()
        });
    }

    /// Returns `true` if no column has a remembered ordering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders a column's tasks.
    ///
    /// Remembered IDs come first, in remembered order, skipping those no
    /// longer present. Tasks not mentioned follow in their input order. The
    /// output is always a permutation of the input.
    #[must_use]
    pub fn materialize(&self, column: TaskStatus, tasks: Vec<Task>) -> Vec<Task> {
        let Some(order) = self.orders.get(&column) else {
            return tasks;
        };

        let mut slots: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
        let mut index: HashMap<TaskId, usize> = HashMap::with_capacity(slots.len());
        for (pos, task) in slots.iter().enumerate() {
            if let Some(task) = task {
                index.entry(task.id.clone()).or_insert(pos);
            }
        }

        let mut out = Vec::with_capacity(slots.len());
        let mut seen = HashSet::new();
        for id in order {
            if !seen.insert(id) {
                continue;
            }
            if let Some(task) = index.get(id).and_then(|&pos| slots[pos].take()) {
                out.push(task);
            }
        }
        out.extend(slots.into_iter().flatten());
        out
    }
}

/// Moves the element at `from` to `to`, shifting the ones in between.
pub(crate) fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}
