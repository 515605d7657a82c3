//! Application state management.
//!
//! [`AppState`] holds the last task list fetched from the store, the board
//! overlays on top of it, and everything the user is pointing at: the
//! selected card, and while dragging, the hovered drop target.

use std::collections::BTreeSet;

use tasklane_board::{
    BoardState, Columns, DivergencePolicy, DragError, DropOutcome, DropTarget, OverlayPolicy,
    ReconcileReport, StatusChangeSink,
};
use tasklane_config::BoardConfig;
use tasklane_protocol::{Task, TaskFilter, TaskId, TaskPriority, TaskStats, TaskStatus};

use crate::dialog::Dialog;
use crate::layout::Hit;

/// Builds the overlay policy configured for the board.
///
/// # Examples
///
/// ```
/// use tasklane_board::DivergencePolicy;
/// use tasklane_config::BoardConfig;
/// use tasklane_tui::state::overlay_policy;
///
/// let policy = overlay_policy(&BoardConfig {
///     drop_diverged_overrides: true,
///     rollback_on_failure: false,
/// });
/// assert_eq!(policy.divergence, DivergencePolicy::DropOnDivergence);
/// ```
#[must_use]
pub fn overlay_policy(config: &BoardConfig) -> OverlayPolicy {
    OverlayPolicy {
        divergence: if config.drop_diverged_overrides {
            DivergencePolicy::DropOnDivergence
        } else {
            DivergencePolicy::KeepUntilMatch
        },
        rollback_on_failure: config.rollback_on_failure,
    }
}

/// A direction key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous column.
    Left,
    /// Next column.
    Right,
    /// Previous card.
    Up,
    /// Next card.
    Down,
}

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Something happened as asked.
    Info,
    /// Something went wrong.
    Error,
}

/// A one-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// How the message is styled.
    pub level: NotificationLevel,
    /// The message.
    pub text: String,
}

impl Notification {
    /// Creates an informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}

/// The application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The task list as last fetched from the store.
    pub tasks: Vec<Task>,
    /// Overlays and drag state on top of `tasks`.
    pub board: BoardState,
    /// The selected column.
    pub selected_column: TaskStatus,
    /// Index of the selected card in the displayed column, if any.
    pub selected_task: Option<usize>,
    /// The drop target under the cursor while dragging.
    pub hover: Option<DropTarget>,
    /// The filter tasks are fetched with.
    pub filter: TaskFilter,
    /// Task counts from the store.
    pub stats: TaskStats,
    /// The message shown in the status bar, if any.
    pub notification: Option<Notification>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// The open dialog, if any.
    pub dialog: Option<Dialog>,
    /// Every tag seen in a fetched list, for the tag filter.
    pub known_tags: BTreeSet<String>,
    /// The task archived last, which `UndoArchive` restores.
    pub last_archived: Option<TaskId>,
    /// Whether no task list has arrived yet.
    pub loading: bool,
}

impl AppState {
    /// Creates an empty state waiting for its first task list.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_board::BoardState;
    /// use tasklane_protocol::TaskStatus;
    /// use tasklane_tui::AppState;
    ///
    /// let state = AppState::new(BoardState::default());
    /// assert_eq!(state.selected_column, TaskStatus::Todo);
    /// assert!(state.loading);
    /// ```
    #[must_use]
    pub fn new(board: BoardState) -> Self {
        Self {
            board,
            loading: true,
            ..Self::default()
        }
    }

    /// Returns the columns as displayed.
    #[must_use]
    pub fn columns(&self) -> Columns {
        self.board.columns(&self.tasks)
    }

    /// Replaces the task list with a freshly fetched one and reconciles
    /// pending moves against it.
    ///
    /// A drag whose task disappeared is cancelled.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) -> ReconcileReport {
        self.tasks = tasks;
        self.loading = false;
        self.known_tags
            .extend(self.tasks.iter().flat_map(|t| t.tags.iter().cloned()));
        let report = self.board.reconcile(&self.tasks);

        let columns = self.columns();
        let dragged_gone = self
            .board
            .dragged()
            .is_some_and(|id| columns.get(id).is_none());
        if dragged_gone {
            self.board.cancel_drag();
            self.hover = None;
        }
        if let Some(DropTarget::Task(id)) = &self.hover
            && columns.get(id).is_none()
        {
            self.hover = None;
        }
        self.clamp_task_selection(&columns);
        report
    }

    /// Applies a task the store just returned from a write.
    ///
    /// The task is updated in place, added at the top when new, or dropped
    /// when the active filter no longer selects it (archived tasks included).
    /// The next refresh replaces the list anyway.
    pub fn upsert_task(&mut self, task: Task) {
        self.known_tags.extend(task.tags.iter().cloned());
        let visible = self.filter.matches(&task);
        match self.tasks.iter().position(|t| t.id == task.id) {
            Some(index) if visible => self.tasks[index] = task,
            Some(index) => {
                self.tasks.remove(index);
            }
            None if visible => self.tasks.insert(0, task),
            None => {}
        }
        let columns = self.columns();
        self.clamp_task_selection(&columns);
    }

    /// Removes a deleted task along with everything the board remembers
    /// about it.
    pub fn remove_task(&mut self, task_id: &TaskId) {
        self.tasks.retain(|t| t.id != *task_id);
        if self.board.dragged() == Some(task_id) {
            self.hover = None;
        }
        if self.hover == Some(DropTarget::Task(task_id.clone())) {
            self.hover = None;
        }
        self.board.forget(task_id);
        if self.last_archived.as_ref() == Some(task_id) {
            self.last_archived = None;
        }
        let columns = self.columns();
        self.clamp_task_selection(&columns);
    }

    /// Returns the selected task, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_board::BoardState;
    /// use tasklane_protocol::Task;
    /// use tasklane_tui::AppState;
    ///
    /// let mut state = AppState::new(BoardState::default());
    /// state.set_tasks(vec![Task::with_id("a", "Task 1", "")]);
    /// assert!(state.selected_task().is_none());
    ///
    /// state.navigate_down();
    /// assert_eq!(state.selected_task().unwrap().title, "Task 1");
    /// ```
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        let index = self.selected_task?;
        self.columns()
            .column(self.selected_column)
            .get(index)
            .cloned()
    }

    /// Returns whether a task is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.board.dragged().is_some()
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Shows a message in the status bar.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Moves the selection, or the hovered drop target while dragging.
    pub fn navigate(&mut self, direction: Direction) {
        if self.is_dragging() {
            self.move_hover(direction);
            return;
        }
        match direction {
            Direction::Left => self.navigate_left(),
            Direction::Right => self.navigate_right(),
            Direction::Up => self.navigate_up(),
            Direction::Down => self.navigate_down(),
        }
    }

    /// Moves the column selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self) {
        self.selected_column = previous_column(self.selected_column);
        self.clamp_task_selection(&self.columns());
    }

    /// Moves the column selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self) {
        self.selected_column = next_column(self.selected_column);
        self.clamp_task_selection(&self.columns());
    }

    /// Moves the task selection up within the current column.
    pub fn navigate_up(&mut self) {
        let len = self.columns().column(self.selected_column).len();
        self.selected_task = match self.selected_task {
            _ if len == 0 => None,
            Some(idx) if idx > 0 => Some(idx - 1),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }

    /// Moves the task selection down within the current column.
    pub fn navigate_down(&mut self) {
        let len = self.columns().column(self.selected_column).len();
        self.selected_task = match self.selected_task {
            _ if len == 0 => None,
            Some(idx) if idx + 1 < len => Some(idx + 1),
            Some(_) | None => Some(0),
        };
    }

    /// Clears the current task selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Selects the card of a task, wherever it is displayed.
    pub fn select(&mut self, task_id: &TaskId) {
        if let Some((status, index)) = self.columns().position(task_id) {
            self.selected_column = status;
            self.selected_task = Some(index);
        }
    }

    /// Starts dragging a task. The task itself becomes the hovered target.
    ///
    /// # Errors
    ///
    /// Returns the board's [`DragError`] when the drag is rejected.
    pub fn start_drag(&mut self, task_id: TaskId) -> Result<(), DragError> {
        self.board.on_drag_start(task_id.clone(), &self.tasks)?;
        self.hover = Some(DropTarget::Task(task_id));
        Ok(())
    }

    /// Starts dragging the selected task.
    ///
    /// Returns the dragged task, or `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns the board's [`DragError`] when the drag is rejected.
    pub fn grab_selected(&mut self) -> Result<Option<TaskId>, DragError> {
        let Some(task) = self.selected_task() else {
            return Ok(None);
        };
        self.start_drag(task.id.clone())?;
        Ok(Some(task.id))
    }

    /// Drops the dragged task on the hovered target.
    pub fn drop_on_hover(&mut self, sink: &mut impl StatusChangeSink) -> DropOutcome {
        let target = self.hover.take();
        self.finish_drag(target, sink)
    }

    /// Drops the dragged task on `target` and selects it where it landed.
    pub fn finish_drag(
        &mut self,
        target: Option<DropTarget>,
        sink: &mut impl StatusChangeSink,
    ) -> DropOutcome {
        let dragged = self.board.dragged().cloned();
        let outcome = self.board.on_drag_end(target, &self.tasks, sink);
        self.hover = None;
        if let Some(id) = dragged {
            self.select(&id);
        }
        outcome
    }

    /// Abandons the current drag. Returns `true` if one was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        self.hover = None;
        let dragged = self.board.dragged().cloned();
        let cancelled = self.board.cancel_drag();
        if let Some(id) = dragged {
            self.select(&id);
        }
        cancelled
    }

    /// Records that the store rejected moving `task_id` to `target`.
    ///
    /// Returns `true` if the card went back to its stored column.
    pub fn status_update_failed(&mut self, task_id: &TaskId, target: TaskStatus) -> bool {
        let rolled_back = self.board.status_update_failed(task_id, target);
        if rolled_back {
            let columns = self.columns();
            self.clamp_task_selection(&columns);
        }
        rolled_back
    }

    /// Resolves what a mouse release over `hit` drops onto.
    #[must_use]
    pub fn target_at(&self, hit: Hit) -> Option<DropTarget> {
        match hit {
            Hit::Card { status, index } => self
                .columns()
                .column(status)
                .get(index)
                .map(|task| DropTarget::Task(task.id.clone())),
            Hit::Column(status) => Some(DropTarget::Column(status)),
            Hit::Outside => None,
        }
    }

    /// Returns the column and card index of the hovered target.
    ///
    /// A column drop zone has no index.
    #[must_use]
    pub fn hover_position(&self, columns: &Columns) -> Option<(TaskStatus, Option<usize>)> {
        match self.hover.as_ref()? {
            DropTarget::Column(status) => Some((*status, None)),
            DropTarget::Task(id) => columns
                .position(id)
                .map(|(status, index)| (status, Some(index))),
        }
    }

    fn move_hover(&mut self, direction: Direction) {
        let columns = self.columns();
        let (status, index) = self
            .hover_position(&columns)
            .unwrap_or((self.selected_column, None));
        let tasks = columns.column(status);
        let card = |index: usize| {
            tasks
                .get(index)
                .map_or(DropTarget::Column(status), |task| {
                    DropTarget::Task(task.id.clone())
                })
        };

        let hover = match direction {
            Direction::Left => DropTarget::Column(previous_column(status)),
            Direction::Right => DropTarget::Column(next_column(status)),
            Direction::Down => match index {
                None => card(0),
                Some(i) => card((i + 1).min(tasks.len().saturating_sub(1))),
            },
            Direction::Up => match index {
                Some(i) if i > 0 => card(i - 1),
                _ => DropTarget::Column(status),
            },
        };

        if let DropTarget::Column(column) = &hover {
            self.selected_column = *column;
        }
        self.hover = Some(hover);
    }

    /// Advances the priority filter: none, then each priority from low to
    /// critical, then none again.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_board::BoardState;
    /// use tasklane_protocol::TaskPriority;
    /// use tasklane_tui::AppState;
    ///
    /// let mut state = AppState::new(BoardState::default());
    /// state.cycle_priority_filter();
    /// assert_eq!(state.filter.priority, Some(TaskPriority::Low));
    /// ```
    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = cycle(self.filter.priority, &TaskPriority::all());
    }

    /// Advances the status filter: none, then each status in workflow order,
    /// then none again.
    pub fn cycle_status_filter(&mut self) {
        self.filter.status = cycle(self.filter.status, &TaskStatus::all());
    }

    /// Advances the tag filter through the known tags in alphabetical
    /// order, then back to none.
    pub fn cycle_tag_filter(&mut self) {
        let next = match self.filter.tags.first() {
            None => self.known_tags.first().cloned(),
            Some(current) => self.known_tags.iter().find(|tag| *tag > current).cloned(),
        };
        self.filter.tags = next.into_iter().collect();
    }

    fn clamp_task_selection(&mut self, columns: &Columns) {
        let len = columns.column(self.selected_column).len();
        if len == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= len
        {
            self.selected_task = Some(len - 1);
        }
    }
}

fn previous_column(status: TaskStatus) -> TaskStatus {
    status.previous().unwrap_or(TaskStatus::Done)
}

fn next_column(status: TaskStatus) -> TaskStatus {
    status.next().unwrap_or(TaskStatus::Todo)
}

fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}
