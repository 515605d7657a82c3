//! Drag interaction state machine.
//!
//! A drag starts on a task and ends with a drop on a [`DropTarget`], or on
//! nothing at all. Every drop returns the controller to idle. Depending on
//! where the task lands, the drop is a no-op, a reorder within its column, or
//! a status change that the caller forwards to the store.

use tasklane_protocol::{TaskId, TaskStatus};
use thiserror::Error;

use crate::columns::Columns;
use crate::optimistic::OptimisticOverlay;
use crate::reorder::{LocalReorder, array_move};

/// Whether a drag is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// The given task is being dragged.
    Dragging(TaskId),
}

/// Where a dragged task was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The drop zone of a column.
    Column(TaskStatus),
    /// Another task card.
    Task(TaskId),
}

/// A request to change the status of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The task to move.
    pub task_id: TaskId,
    /// The effective status it was dragged from.
    pub from: TaskStatus,
    /// The status it was dropped into.
    pub to: TaskStatus,
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress.
    NotDragging,
    /// Released outside any target.
    Cancelled,
    /// Nothing to do: dropped on itself, on its own column, or on an
    /// unknown target.
    Unchanged,
    /// Reordered within a column; the store is not involved.
    Reordered {
        /// The column that was reordered.
        column: TaskStatus,
        /// Its new ordering.
        order: Vec<TaskId>,
    },
    /// Moved to another column; the status change must be sent to the store.
    Moved(StatusChange),
}

impl DropOutcome {
    /// Returns the status change to request, if any.
    #[must_use]
    pub fn status_change(&self) -> Option<&StatusChange> {
        match self {
            Self::Moved(change) => Some(change),
            _ => None,
        }
    }
}

/// Errors when starting a drag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    /// Another drag is still open.
    #[error("already dragging task {0}")]
    AlreadyDragging(TaskId),

    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Drives a single drag at a time.
///
/// # Examples
///
/// ```
/// use tasklane_board::{Columns, DragController, DropOutcome, DropTarget, LocalReorder, OptimisticOverlay};
/// use tasklane_protocol::{Task, TaskId, TaskStatus};
///
/// let columns = Columns::partition(vec![Task::with_id("a", "A", "")]);
/// let mut optimistic = OptimisticOverlay::default();
/// let mut reorder = LocalReorder::default();
/// let mut drag = DragController::default();
///
/// drag.start(TaskId::from("a"), &columns).unwrap();
/// let outcome = drag.drop(
///     Some(DropTarget::Column(TaskStatus::Done)),
///     &columns,
///     &mut optimistic,
///     &mut reorder,
/// );
///
/// assert!(matches!(outcome, DropOutcome::Moved(_)));
/// assert!(!drag.is_dragging());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the dragged task, if any.
    #[must_use]
    pub fn active(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Starts dragging a task shown in `columns`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] if a drag is open and
    /// [`DragError::UnknownTask`] if the task is not displayed. The state is
    /// unchanged on error.
    pub fn start(&mut self, task_id: TaskId, columns: &Columns) -> Result<(), DragError> {
        if let DragState::Dragging(active) = &self.state {
            return Err(DragError::AlreadyDragging(active.clone()));
        }
        if columns.get(&task_id).is_none() {
            return Err(DragError::UnknownTask(task_id));
        }
        self.state = DragState::Dragging(task_id);
        Ok(())
    }

    /// Ends the drag.
    ///
    /// `columns` must be the board as currently displayed, with both overlays
    /// applied. A cross-column move is recorded in `optimistic` and clears the
    /// remembered order of both columns; a same-column drop updates `reorder`.
    pub fn drop(
        &mut self,
        target: Option<DropTarget>,
        columns: &Columns,
        optimistic: &mut OptimisticOverlay,
        reorder: &mut LocalReorder,
    ) -> DropOutcome {
        let DragState::Dragging(task_id) = std::mem::take(&mut self.state) else {
            return DropOutcome::NotDragging;
        };
        let Some(target) = target else {
            return DropOutcome::Cancelled;
        };
        // The task may have vanished in a refresh during the drag.
        let Some(from) = columns.column_of(&task_id) else {
            return DropOutcome::Unchanged;
        };

        let to = match target {
            DropTarget::Task(over) if over == task_id => return DropOutcome::Unchanged,
            DropTarget::Task(over) => match columns.column_of(&over) {
                None => return DropOutcome::Unchanged,
                Some(column) if column == from => {
                    return reorder_within(column, &task_id, &over, columns, reorder);
                }
                Some(column) => column,
            },
            DropTarget::Column(column) => column,
        };
        if to == from {
            return DropOutcome::Unchanged;
        }

        optimistic.record_move(task_id.clone(), from, to);
        reorder.clear(from);
        reorder.clear(to);
        DropOutcome::Moved(StatusChange { task_id, from, to })
    }

    /// Abandons the drag. Returns `true` if one was in progress.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.state) != DragState::Idle
    }
}

fn reorder_within(
    column: TaskStatus,
    dragged: &TaskId,
    over: &TaskId,
    columns: &Columns,
    reorder: &mut LocalReorder,
) -> DropOutcome {
    let mut order = columns.ids(column);
    let old_index = order.iter().position(|id| id == dragged);
    let new_index = order.iter().position(|id| id == over);
    match (old_index, new_index) {
        (Some(old), Some(new)) if old != new => {
            array_move(&mut order, old, new);
            reorder.set_order(column, order.clone());
            DropOutcome::Reordered { column, order }
        }
        _ => DropOutcome::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklane_protocol::Task;

    fn id(s: &str) -> TaskId {
        TaskId::from(s)
    }

    fn task(s: &str, status: TaskStatus) -> Task {
        Task::with_id(s, s, "").with_status(status)
    }

    struct Fixture {
        columns: Columns,
        optimistic: OptimisticOverlay,
        reorder: LocalReorder,
        drag: DragController,
    }

    impl Fixture {
        fn new(tasks: Vec<Task>) -> Self {
            Self {
                columns: Columns::partition(tasks),
                optimistic: OptimisticOverlay::default(),
                reorder: LocalReorder::default(),
                drag: DragController::default(),
            }
        }

        fn drag(&mut self, task: &str, target: Option<DropTarget>) -> DropOutcome {
            self.drag.start(id(task), &self.columns).expect("start drag");
            self.drag.drop(
                target,
                &self.columns,
                &mut self.optimistic,
                &mut self.reorder,
            )
        }
    }

    #[test]
    fn start_rejects_unknown_task() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        assert_eq!(
            f.drag.start(id("zzz"), &f.columns),
            Err(DragError::UnknownTask(id("zzz")))
        );
        assert_eq!(f.drag.state(), &DragState::Idle);
    }

    #[test]
    fn start_rejects_second_drag() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Todo)]);
        f.drag.start(id("a"), &f.columns).expect("first drag");

        assert_eq!(
            f.drag.start(id("b"), &f.columns),
            Err(DragError::AlreadyDragging(id("a")))
        );
        assert_eq!(f.drag.active(), Some(&id("a")));
    }

    #[test]
    fn drop_without_drag() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        let outcome = f.drag.drop(
            Some(DropTarget::Column(TaskStatus::Done)),
            &f.columns,
            &mut f.optimistic,
            &mut f.reorder,
        );
        assert_eq!(outcome, DropOutcome::NotDragging);
        assert!(f.optimistic.is_empty());
    }

    #[test]
    fn drop_on_nothing_cancels() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        assert_eq!(f.drag("a", None), DropOutcome::Cancelled);
        assert!(!f.drag.is_dragging());
        assert!(f.optimistic.is_empty());
        assert!(f.reorder.is_empty());
    }

    #[test]
    fn drop_on_itself_changes_nothing() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Todo)]);
        f.reorder.set_order(TaskStatus::Todo, vec![id("b"), id("a")]);

        assert_eq!(
            f.drag("a", Some(DropTarget::Task(id("a")))),
            DropOutcome::Unchanged
        );
        assert!(f.optimistic.is_empty());
        assert_eq!(f.reorder.order(TaskStatus::Todo), Some([id("b"), id("a")].as_slice()));
        assert!(!f.drag.is_dragging());
    }

    #[test]
    fn drop_on_own_column_changes_nothing() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        assert_eq!(
            f.drag("a", Some(DropTarget::Column(TaskStatus::Todo))),
            DropOutcome::Unchanged
        );
        assert!(f.optimistic.is_empty());
    }

    #[test]
    fn drop_on_column_zone_moves_task() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Todo)]);
        f.reorder.set_order(TaskStatus::Todo, vec![id("b"), id("a")]);
        f.reorder.set_order(TaskStatus::InProgress, vec![id("x")]);

        let outcome = f.drag("a", Some(DropTarget::Column(TaskStatus::InProgress)));

        assert_eq!(
            outcome,
            DropOutcome::Moved(StatusChange {
                task_id: id("a"),
                from: TaskStatus::Todo,
                to: TaskStatus::InProgress,
            })
        );
        assert_eq!(
            f.optimistic.pending(&id("a")).map(|p| p.target),
            Some(TaskStatus::InProgress)
        );
        assert!(f.reorder.order(TaskStatus::Todo).is_none());
        assert!(f.reorder.order(TaskStatus::InProgress).is_none());
    }

    #[test]
    fn drop_on_task_in_other_column_uses_its_column() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::CodeReview)]);

        let outcome = f.drag("a", Some(DropTarget::Task(id("b"))));

        assert_eq!(
            outcome.status_change().map(|c| c.to),
            Some(TaskStatus::CodeReview)
        );
    }

    #[test]
    fn drop_on_task_in_same_column_reorders() {
        let mut f = Fixture::new(vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Todo),
            task("c", TaskStatus::Todo),
        ]);

        let outcome = f.drag("c", Some(DropTarget::Task(id("a"))));

        let expected = vec![id("c"), id("a"), id("b")];
        assert_eq!(
            outcome,
            DropOutcome::Reordered {
                column: TaskStatus::Todo,
                order: expected.clone(),
            }
        );
        assert_eq!(f.reorder.order(TaskStatus::Todo), Some(expected.as_slice()));
        assert!(f.optimistic.is_empty());
    }

    #[test]
    fn drop_on_unknown_task_changes_nothing() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        assert_eq!(
            f.drag("a", Some(DropTarget::Task(id("ghost")))),
            DropOutcome::Unchanged
        );
        assert!(f.optimistic.is_empty());
    }

    #[test]
    fn task_vanishing_mid_drag_is_a_no_op() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        f.drag.start(id("a"), &f.columns).expect("start drag");

        let refreshed = Columns::partition(Vec::new());
        let outcome = f.drag.drop(
            Some(DropTarget::Column(TaskStatus::Done)),
            &refreshed,
            &mut f.optimistic,
            &mut f.reorder,
        );

        assert_eq!(outcome, DropOutcome::Unchanged);
        assert!(f.optimistic.is_empty());
        assert!(!f.drag.is_dragging());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut f = Fixture::new(vec![task("a", TaskStatus::Todo)]);
        assert!(!f.drag.cancel());

        f.drag.start(id("a"), &f.columns).expect("start drag");
        assert!(f.drag.cancel());
        assert_eq!(f.drag.state(), &DragState::Idle);
    }
}
