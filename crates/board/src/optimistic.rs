//! Optimistic status overrides.
//!
//! A cross-column drop takes effect on screen immediately, before the store
//! has confirmed it. [`OptimisticOverlay`] remembers those pending moves and
//! layers them over the authoritative task list until a refreshed list shows
//! the store has caught up.

use std::collections::{HashMap, HashSet};

use tasklane_protocol::{Task, TaskId, TaskStatus};

/// A status change shown on screen but not yet confirmed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    /// The status the task was dropped into.
    pub target: TaskStatus,
    /// The effective status the task had when it was dropped.
    pub origin: TaskStatus,
}

/// What to do with a pending move when the store reports a third status,
/// neither the origin nor the target of the move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DivergencePolicy {
    /// Keep showing the target until the store reports it.
    #[default]
    KeepUntilMatch,
    /// Drop the override and show what the store reports.
    DropOnDivergence,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Moves the store has confirmed; removed.
    pub confirmed: Vec<TaskId>,
    /// Moves for tasks no longer in the list; removed.
    pub collected: Vec<TaskId>,
    /// Moves whose task the store placed in a third status. Removed only
    /// under [`DivergencePolicy::DropOnDivergence`].
    pub diverged: Vec<TaskId>,
}

impl ReconcileReport {
    /// Returns `true` if the pass found nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.collected.is_empty() && self.diverged.is_empty()
    }
}

/// Pending status overrides, keyed by task.
///
/// # Examples
///
/// ```
/// use tasklane_board::OptimisticOverlay;
/// use tasklane_board::optimistic::DivergencePolicy;
/// use tasklane_protocol::{Task, TaskId, TaskStatus};
///
/// let mut overlay = OptimisticOverlay::default();
/// overlay.record_move(TaskId::from("a"), TaskStatus::Todo, TaskStatus::Done);
///
/// // The store has not caught up yet: the override still applies.
/// let stale = vec![Task::with_id("a", "A", "")];
/// assert_eq!(overlay.apply(&stale)[0].status, TaskStatus::Done);
///
/// // Once the store reports the target, the override is dropped.
/// let fresh = vec![Task::with_id("a", "A", "").with_status(TaskStatus::Done)];
/// overlay.reconcile(&fresh, DivergencePolicy::KeepUntilMatch);
/// assert!(overlay.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptimisticOverlay {
    entries: HashMap<TaskId, PendingMove>,
}

impl OptimisticOverlay {
    /// Records a move, replacing any earlier pending move of the same task.
    pub fn record_move(&mut self, task_id: TaskId, origin: TaskStatus, target: TaskStatus) {
        self.entries.insert(task_id, PendingMove { target, origin });
    }

    /// Compares pending moves against a freshly fetched task list.
    ///
    /// Archived tasks count as absent.
    pub fn reconcile(
        &mut self,
        authoritative: &[Task],
        policy: DivergencePolicy,
    ) -> ReconcileReport {
        let statuses: HashMap<&TaskId, TaskStatus> = authoritative
            .iter()
            .filter(|t| !t.is_archived)
            .map(|t| (&t.id, t.status))
            .collect();

        let mut report = ReconcileReport::default();
        self.entries.retain(|id, pending| match statuses.get(id) {
            None => {
                report.collected.push(id.clone());
                false
            }
            Some(&status) if status == pending.target => {
                report.confirmed.push(id.clone());
                false
            }
            Some(&status) if status == pending.origin => true,
            Some(_) => {
                report.diverged.push(id.clone());
                policy == DivergencePolicy::KeepUntilMatch
            }
        });

        // HashMap iteration order is arbitrary; keep reports stable.
        report.confirmed.sort();
        report.collected.sort();
        report.diverged.sort();
        report
    }

    /// Returns the task list with pending statuses substituted.
    ///
    /// Order and every other field are unchanged.
    #[must_use]
    pub fn apply(&self, authoritative: &[Task]) -> Vec<Task> {
        authoritative
            .iter()
            .map(|task| match self.entries.get(&task.id) {
                Some(pending) if pending.target != task.status => Task {
                    status: pending.target,
                    ..task.clone()
                },
                _ => task.clone(),
            })
            .collect()
    }

    /// Returns the status a task is displayed with.
    #[must_use]
    pub fn effective_status(&self, task: &Task) -> TaskStatus {
        self.entries
            .get(&task.id)
            .map_or(task.status, |pending| pending.target)
    }

    /// Returns the pending move of a task, if any.
    #[must_use]
    pub fn pending(&self, task_id: &TaskId) -> Option<&PendingMove> {
        self.entries.get(task_id)
    }

    /// Removes the pending move of a task.
    pub fn clear(&mut self, task_id: &TaskId) -> Option<PendingMove> {
        self.entries.remove(task_id)
    }

    /// Removes the pending move of a task only if it still targets `target`.
    ///
    /// A later move of the same task replaces the entry, so a stale answer
    /// about an earlier move leaves the newer one alone.
    pub fn clear_target(&mut self, task_id: &TaskId, target: TaskStatus) -> Option<PendingMove> {
        match self.entries.get(task_id) {
            Some(pending) if pending.target == target => self.entries.remove(task_id),
            _ => None,
        }
    }

    /// IDs of all tasks with a pending move.
    #[must_use]
    pub fn pending_ids(&self) -> HashSet<&TaskId> {
        self.entries.keys().collect()
    }

    /// Number of pending moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no move is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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

    #[test]
    fn reconcile_drops_confirmed_move() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);

        let report = overlay.reconcile(
            &[task("a", TaskStatus::InProgress)],
            DivergencePolicy::KeepUntilMatch,
        );

        assert!(overlay.pending(&id("a")).is_none());
        assert_eq!(report.confirmed, vec![id("a")]);
    }

    #[test]
    fn reconcile_keeps_unconfirmed_move() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);

        let stale = [task("a", TaskStatus::Todo)];
        let report = overlay.reconcile(&stale, DivergencePolicy::KeepUntilMatch);

        assert!(report.is_empty());
        assert!(overlay.pending(&id("a")).is_some());
        assert_eq!(overlay.apply(&stale)[0].status, TaskStatus::InProgress);
    }

    #[test]
    fn reconcile_collects_vanished_and_archived_tasks() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::Done);
        overlay.record_move(id("b"), TaskStatus::Todo, TaskStatus::Done);

        let mut archived = task("a", TaskStatus::Todo);
        archived.is_archived = true;
        let report = overlay.reconcile(&[archived], DivergencePolicy::KeepUntilMatch);

        assert!(overlay.is_empty());
        assert_eq!(report.collected, vec![id("a"), id("b")]);
    }

    #[test]
    fn divergence_is_kept_by_default() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);

        let moved_elsewhere = [task("a", TaskStatus::Done)];
        let report = overlay.reconcile(&moved_elsewhere, DivergencePolicy::KeepUntilMatch);

        assert_eq!(report.diverged, vec![id("a")]);
        assert_eq!(
            overlay.effective_status(&moved_elsewhere[0]),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn divergence_can_drop_the_override() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);

        let moved_elsewhere = [task("a", TaskStatus::Done)];
        let report = overlay.reconcile(&moved_elsewhere, DivergencePolicy::DropOnDivergence);

        assert_eq!(report.diverged, vec![id("a")]);
        assert!(overlay.is_empty());
        assert_eq!(overlay.effective_status(&moved_elsewhere[0]), TaskStatus::Done);
    }

    #[test]
    fn later_move_overwrites_earlier_one() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);
        overlay.record_move(id("a"), TaskStatus::InProgress, TaskStatus::CodeReview);

        assert_eq!(overlay.len(), 1);
        assert_eq!(
            overlay.pending(&id("a")),
            Some(&PendingMove {
                target: TaskStatus::CodeReview,
                origin: TaskStatus::InProgress,
            })
        );
    }

    #[test]
    fn apply_only_changes_status() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("b"), TaskStatus::Todo, TaskStatus::Done);

        let tasks = vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Todo)];
        let applied = overlay.apply(&tasks);

        assert_eq!(applied[0], tasks[0]);
        assert_eq!(applied[1].status, TaskStatus::Done);
        assert_eq!(applied[1].title, tasks[1].title);
        assert_eq!(applied[1].created_at, tasks[1].created_at);
    }

    #[test]
    fn clear_removes_pending_move() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::Done);

        assert!(overlay.clear(&id("a")).is_some());
        assert!(overlay.clear(&id("a")).is_none());
        assert!(overlay.pending_ids().is_empty());
    }

    #[test]
    fn clear_target_ignores_a_replaced_move() {
        let mut overlay = OptimisticOverlay::default();
        overlay.record_move(id("a"), TaskStatus::Todo, TaskStatus::InProgress);
        overlay.record_move(id("a"), TaskStatus::InProgress, TaskStatus::Done);

        assert!(overlay.clear_target(&id("a"), TaskStatus::InProgress).is_none());
        assert_eq!(overlay.pending(&id("a")).map(|p| p.target), Some(TaskStatus::Done));

        assert!(overlay.clear_target(&id("a"), TaskStatus::Done).is_some());
        assert!(overlay.is_empty());
    }
}
