//! Board state aggregate.
//!
//! [`BoardState`] owns both overlays and the drag controller, and is the
//! surface the UI talks to: it renders columns from the authoritative task
//! list, routes drag gestures, and reconciles after every refresh.

use std::collections::HashSet;

use tasklane_protocol::{Task, TaskId, TaskStatus};
use tracing::{debug, info, warn};

use crate::columns::Columns;
use crate::drag::{DragController, DragError, DropOutcome, DropTarget, StatusChange};
use crate::optimistic::{DivergencePolicy, OptimisticOverlay, PendingMove, ReconcileReport};
use crate::reorder::LocalReorder;

/// How pending moves react to store feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayPolicy {
    /// Handling of a third status reported by the store.
    pub divergence: DivergencePolicy,
    /// Drop the override when the store reports a failed update. When unset,
    /// the override stays until a refresh confirms or collects it.
    pub rollback_on_failure: bool,
}

/// Receives the status changes produced by cross-column drops.
///
/// Implemented for closures and for `Vec<StatusChange>`.
pub trait StatusChangeSink {
    /// Called once per confirmed cross-column move.
    fn status_change_requested(&mut self, change: StatusChange);
}

impl<F> StatusChangeSink for F
where
    F: FnMut(StatusChange),
{
    fn status_change_requested(&mut self, change: StatusChange) {
        self(change);
    }
}

impl StatusChangeSink for Vec<StatusChange> {
    fn status_change_requested(&mut self, change: StatusChange) {
        self.push(change);
    }
}

/// Client-side board state layered over the store's task list.
///
/// # Examples
///
/// ```
/// use tasklane_board::{BoardState, DropTarget, StatusChange};
/// use tasklane_protocol::{Task, TaskId, TaskStatus};
///
/// let tasks = vec![Task::with_id("a", "A", ""), Task::with_id("b", "B", "")];
/// let mut board = BoardState::default();
/// let mut requests: Vec<StatusChange> = Vec::new();
///
/// board.on_drag_start(TaskId::from("a"), &tasks).unwrap();
/// board.on_drag_end(
///     Some(DropTarget::Column(TaskStatus::InProgress)),
///     &tasks,
///     &mut requests,
/// );
///
/// assert_eq!(requests.len(), 1);
/// let columns = board.columns(&tasks);
/// assert_eq!(columns.column(TaskStatus::Todo).len(), 1);
/// assert_eq!(columns.column(TaskStatus::InProgress)[0].id, TaskId::from("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    optimistic: OptimisticOverlay,
    reorder: LocalReorder,
    drag: DragController,
    policy: OverlayPolicy,
}

impl BoardState {
    /// Creates an empty board state with the given policy.
    #[must_use]
    pub fn new(policy: OverlayPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Returns the policy in effect.
    #[must_use]
    pub fn policy(&self) -> OverlayPolicy {
        self.policy
    }

    /// Returns the optimistic overlay.
    #[must_use]
    pub fn optimistic(&self) -> &OptimisticOverlay {
        &self.optimistic
    }

    /// Returns the local reorder overlay.
    #[must_use]
    pub fn reorder(&self) -> &LocalReorder {
        &self.reorder
    }

    /// Returns the drag controller.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Returns the dragged task, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&TaskId> {
        self.drag.active()
    }

    /// Returns the pending move of a task, if any.
    #[must_use]
    pub fn pending(&self, task_id: &TaskId) -> Option<&PendingMove> {
        self.optimistic.pending(task_id)
    }

    /// Builds the columns as displayed.
    ///
    /// Pending statuses are applied to `tasks` first, the result is
    /// partitioned, and each column is put in its remembered order.
    #[must_use]
    pub fn columns(&self, tasks: &[Task]) -> Columns {
        let mut columns = Columns::partition(self.optimistic.apply(tasks));
        for status in TaskStatus::all() {
            columns.rearrange(status, |column| self.reorder.materialize(status, column));
        }
        columns
    }

    /// Starts dragging a displayed task.
    ///
    /// # Errors
    ///
    /// See [`DragController::start`].
    pub fn on_drag_start(&mut self, task_id: TaskId, tasks: &[Task]) -> Result<(), DragError> {
        let columns = self.columns(tasks);
        match self.drag.start(task_id.clone(), &columns) {
            Ok(()) => {
                debug!(task_id = %task_id, "drag started");
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "drag start rejected");
                Err(err)
            }
        }
    }

    /// Ends the current drag.
    ///
    /// A cross-column move is reported to `sink` exactly once.
    pub fn on_drag_end(
        &mut self,
        target: Option<DropTarget>,
        tasks: &[Task],
        sink: &mut impl StatusChangeSink,
    ) -> DropOutcome {
        let columns = self.columns(tasks);
        let outcome = self.drag.drop(
            target.clone(),
            &columns,
            &mut self.optimistic,
            &mut self.reorder,
        );

        match &outcome {
            DropOutcome::Moved(change) => {
                info!(
                    task_id = %change.task_id,
                    from = %change.from,
                    to = %change.to,
                    "status change requested"
                );
                sink.status_change_requested(change.clone());
            }
            DropOutcome::Reordered { column, order } => {
                debug!(column = %column, len = order.len(), "column reordered");
            }
            other => debug!(?target, outcome = ?other, "drop ignored"),
        }
        outcome
    }

    /// Abandons the current drag. Returns `true` if one was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            debug!("drag cancelled");
        }
        cancelled
    }

    /// Reconciles pending moves with a freshly fetched task list.
    ///
    /// Remembered orderings also forget tasks that are no longer listed.
    pub fn reconcile(&mut self, tasks: &[Task]) -> ReconcileReport {
        let report = self.optimistic.reconcile(tasks, self.policy.divergence);
        let live: HashSet<&TaskId> = tasks
            .iter()
            .filter(|t| !t.is_archived)
            .map(|t| &t.id)
            .collect();
        self.reorder.retain_tasks(|id| live.contains(id));
        if !report.is_empty() {
            debug!(
                confirmed = report.confirmed.len(),
                collected = report.collected.len(),
                diverged = report.diverged.len(),
                pending = self.optimistic.len(),
                "reconciled optimistic moves"
            );
        }
        if !report.diverged.is_empty() {
            warn!(
                tasks = ?report.diverged,
                policy = ?self.policy.divergence,
                "store moved pending tasks to a third status"
            );
        }
        report
    }

    /// Notifies the board that the store rejected moving `task_id` to
    /// `target`.
    ///
    /// Returns `true` if the override was rolled back. Only the override for
    /// that same move is cleared; a newer move of the task stays pending.
    pub fn status_update_failed(&mut self, task_id: &TaskId, target: TaskStatus) -> bool {
        let rolled_back = self.policy.rollback_on_failure
            && self.optimistic.clear_target(task_id, target).is_some();
        warn!(task_id = %task_id, to = %target, rolled_back, "status update failed");
        rolled_back
    }

    /// Drops everything the board remembers about a deleted task.
    pub fn forget(&mut self, task_id: &TaskId) {
        self.optimistic.clear(task_id);
        self.reorder.retain_tasks(|id| id != task_id);
        if self.drag.active() == Some(task_id) {
            self.drag.cancel();
        }
        debug!(task_id = %task_id, "task forgotten");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TaskId {
        TaskId::from(s)
    }

    fn task(s: &str, status: TaskStatus) -> Task {
        Task::with_id(s, s, "").with_status(status)
    }

    fn ids(columns: &Columns, status: TaskStatus) -> Vec<&str> {
        columns.column(status).iter().map(|t| t.id.as_str()).collect()
    }

    fn drag(
        board: &mut BoardState,
        tasks: &[Task],
        from: &str,
        target: Option<DropTarget>,
    ) -> (DropOutcome, Vec<StatusChange>) {
        let mut requests = Vec::new();
        board.on_drag_start(id(from), tasks).expect("start drag");
        let outcome = board.on_drag_end(target, tasks, &mut requests);
        (outcome, requests)
    }

    #[test]
    fn cross_column_drop_scenario() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)];
        let mut board = BoardState::default();

        let (_, requests) = drag(
            &mut board,
            &tasks,
            "A",
            Some(DropTarget::Column(TaskStatus::InProgress)),
        );

        assert_eq!(
            requests,
            vec![StatusChange {
                task_id: id("A"),
                from: TaskStatus::Todo,
                to: TaskStatus::InProgress,
            }]
        );
        assert_eq!(board.optimistic().len(), 1);
        assert!(board.reorder().is_empty());

        let columns = board.columns(&tasks);
        assert_eq!(ids(&columns, TaskStatus::Todo), ["B"]);
        assert_eq!(ids(&columns, TaskStatus::InProgress), ["A"]);
    }

    #[test]
    fn same_column_drop_scenario() {
        let tasks = vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ];
        let mut board = BoardState::default();

        let (outcome, requests) = drag(&mut board, &tasks, "C", Some(DropTarget::Task(id("A"))));

        assert!(requests.is_empty());
        assert!(matches!(outcome, DropOutcome::Reordered { .. }));
        assert_eq!(
            board.reorder().order(TaskStatus::Todo),
            Some([id("C"), id("A"), id("B")].as_slice())
        );
        assert_eq!(ids(&board.columns(&tasks), TaskStatus::Todo), ["C", "A", "B"]);
    }

    #[test]
    fn reorder_uses_displayed_order() {
        let tasks = vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "C", Some(DropTarget::Task(id("A"))));

        // Displayed order is now C, A, B: dropping A onto C puts A first.
        drag(&mut board, &tasks, "A", Some(DropTarget::Task(id("C"))));
        assert_eq!(ids(&board.columns(&tasks), TaskStatus::Todo), ["A", "C", "B"]);
    }

    #[test]
    fn drag_starts_from_effective_column() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Done)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        // A is displayed in Done now; dropping it on B is a same-column reorder.
        let (outcome, requests) = drag(&mut board, &tasks, "A", Some(DropTarget::Task(id("B"))));
        assert!(requests.is_empty());
        assert_eq!(
            outcome,
            DropOutcome::Reordered {
                column: TaskStatus::Done,
                order: vec![id("B"), id("A")],
            }
        );
    }

    #[test]
    fn drop_on_self_leaves_overlays_untouched() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "B", Some(DropTarget::Task(id("A"))));
        let before = board.reorder().order(TaskStatus::Todo).map(<[TaskId]>::to_vec);

        let (outcome, requests) = drag(&mut board, &tasks, "A", Some(DropTarget::Task(id("A"))));

        assert_eq!(outcome, DropOutcome::Unchanged);
        assert!(requests.is_empty());
        assert!(board.optimistic().is_empty());
        assert_eq!(
            board.reorder().order(TaskStatus::Todo).map(<[TaskId]>::to_vec),
            before
        );
    }

    #[test]
    fn closure_sink_receives_change() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let mut board = BoardState::default();
        let mut seen = Vec::new();
        let mut sink = |change: StatusChange| seen.push(change.to);

        board.on_drag_start(id("A"), &tasks).expect("start drag");
        board.on_drag_end(
            Some(DropTarget::Column(TaskStatus::Done)),
            &tasks,
            &mut sink,
        );

        assert_eq!(seen, vec![TaskStatus::Done]);
    }

    #[test]
    fn second_drag_is_rejected() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)];
        let mut board = BoardState::default();
        board.on_drag_start(id("A"), &tasks).expect("start drag");

        assert!(matches!(
            board.on_drag_start(id("B"), &tasks),
            Err(DragError::AlreadyDragging(_))
        ));
        assert_eq!(board.dragged(), Some(&id("A")));
        assert!(board.cancel_drag());
        assert!(board.dragged().is_none());
    }

    #[test]
    fn reconcile_confirms_and_keeps() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        // Store has not caught up.
        board.reconcile(&tasks);
        assert!(board.pending(&id("A")).is_some());
        assert_eq!(ids(&board.columns(&tasks), TaskStatus::Done), ["A"]);

        // Store confirms.
        let refreshed = vec![task("A", TaskStatus::Done)];
        let report = board.reconcile(&refreshed);
        assert_eq!(report.confirmed, vec![id("A")]);
        assert!(board.pending(&id("A")).is_none());
        assert_eq!(ids(&board.columns(&refreshed), TaskStatus::Done), ["A"]);
    }

    #[test]
    fn reconcile_collects_archived_task() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        // A was archived meanwhile and is no longer fetched.
        let refreshed = vec![task("B", TaskStatus::Todo)];
        let report = board.reconcile(&refreshed);

        assert_eq!(report.collected, vec![id("A")]);
        assert!(board.optimistic().is_empty());
    }

    #[test]
    fn divergence_policy_is_applied() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let policy = OverlayPolicy {
            divergence: DivergencePolicy::DropOnDivergence,
            ..OverlayPolicy::default()
        };
        let mut board = BoardState::new(policy);
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        let refreshed = vec![task("A", TaskStatus::CodeReview)];
        board.reconcile(&refreshed);

        assert!(board.optimistic().is_empty());
        assert_eq!(ids(&board.columns(&refreshed), TaskStatus::CodeReview), ["A"]);
    }

    #[test]
    fn failure_leaves_override_pending_by_default() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        assert!(!board.status_update_failed(&id("A"), TaskStatus::Done));
        assert!(board.pending(&id("A")).is_some());
    }

    #[test]
    fn failure_rolls_back_when_configured() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let mut board = BoardState::new(OverlayPolicy {
            rollback_on_failure: true,
            ..OverlayPolicy::default()
        });
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));

        assert!(board.status_update_failed(&id("A"), TaskStatus::Done));
        assert_eq!(ids(&board.columns(&tasks), TaskStatus::Todo), ["A"]);
        assert!(!board.status_update_failed(&id("A"), TaskStatus::Done));
    }

    #[test]
    fn failure_of_an_earlier_move_keeps_the_newer_one() {
        let tasks = vec![task("A", TaskStatus::Todo)];
        let mut board = BoardState::new(OverlayPolicy {
            rollback_on_failure: true,
            ..OverlayPolicy::default()
        });
        let (_, first) = drag(
            &mut board,
            &tasks,
            "A",
            Some(DropTarget::Column(TaskStatus::InProgress)),
        );
        let (_, second) = drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));
        let sent: Vec<TaskStatus> = first.iter().chain(&second).map(|c| c.to).collect();
        assert_eq!(sent, [TaskStatus::InProgress, TaskStatus::Done]);

        // The first request fails while the second is still in flight.
        assert!(!board.status_update_failed(&id("A"), TaskStatus::InProgress));
        assert_eq!(board.columns(&tasks).column_of(&id("A")), Some(TaskStatus::Done));

        assert!(board.status_update_failed(&id("A"), TaskStatus::Done));
        assert_eq!(board.columns(&tasks).column_of(&id("A")), Some(TaskStatus::Todo));
    }

    #[test]
    fn reconcile_prunes_orderings_of_vanished_tasks() {
        let tasks = vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "C", Some(DropTarget::Task(id("A"))));

        let refreshed = vec![task("A", TaskStatus::Todo), task("C", TaskStatus::Todo)];
        board.reconcile(&refreshed);

        assert_eq!(
            board.reorder().order(TaskStatus::Todo),
            Some([id("C"), id("A")].as_slice())
        );
        assert_eq!(ids(&board.columns(&refreshed), TaskStatus::Todo), ["C", "A"]);
    }

    #[test]
    fn forget_clears_every_trace_of_a_task() {
        let tasks = vec![task("A", TaskStatus::Todo), task("B", TaskStatus::Todo)];
        let mut board = BoardState::default();
        drag(&mut board, &tasks, "B", Some(DropTarget::Task(id("A"))));
        drag(&mut board, &tasks, "A", Some(DropTarget::Column(TaskStatus::Done)));
        board.on_drag_start(id("A"), &tasks).expect("start drag");

        board.forget(&id("A"));

        assert!(board.pending(&id("A")).is_none());
        assert!(board.dragged().is_none());
        assert!(
            board
                .reorder()
                .order(TaskStatus::Todo)
                .is_none_or(|order| !order.contains(&id("A")))
        );
    }
}
