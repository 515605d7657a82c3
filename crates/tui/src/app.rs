//! Main application struct and run loop.
//!
//! [`App`] owns the board state, turns [`Message`]s into state changes and
//! store commands, and folds [`StoreEvent`]s from the store worker back into
//! the state.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};
use tasklane_board::{BoardState, DropOutcome, OverlayPolicy, StatusChange};
use tasklane_config::Config;
use tasklane_protocol::{Message, NewTask, TaskUpdate};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::{
    AppState,
    dialog::Dialog,
    event::{dialog_event_to_message, event_to_message, poll_event},
    layout::{Hit, MIN_HEIGHT, MIN_WIDTH, ScreenLayout},
    state::{Direction, Notification, overlay_policy},
    terminal::AppTerminal,
    widgets::{
        BoardView, render_board, render_dialog, render_header, render_help_overlay,
        render_status_bar,
    },
    worker::{FailedRequest, StoreCommand, StoreEvent},
};

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Last known terminal area, used for mouse hit-testing.
    last_area: Rect,
    /// Where store commands go; `None` until connected to a worker.
    commands: Option<UnboundedSender<StoreCommand>>,
}

impl App {
    /// Creates an application with the given overlay policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_board::OverlayPolicy;
    /// use tasklane_tui::App;
    ///
    /// let app = App::new(OverlayPolicy::default());
    /// assert!(app.state().loading);
    /// ```
    #[must_use]
    pub fn new(policy: OverlayPolicy) -> Self {
        Self {
            state: AppState::new(BoardState::new(policy)),
            should_quit: false,
            last_area: Rect::default(),
            commands: None,
        }
    }

    /// Creates an application configured from `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_config::Config;
    /// use tasklane_tui::App;
    ///
    /// let mut config = Config::default();
    /// config.board.rollback_on_failure = true;
    ///
    /// let app = App::with_config(&config);
    /// assert!(app.state().board.policy().rollback_on_failure);
    /// ```
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self::new(overlay_policy(&config.board))
    }

    /// Sends store commands to `commands` from now on.
    #[must_use]
    pub fn connect(mut self, commands: UnboundedSender<StoreCommand>) -> Self {
        self.commands = Some(commands);
        self
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns whether the application is about to exit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, most messages are intercepted to
    /// dismiss the help instead of their normal action. Only `Quit` and
    /// `ToggleHelp` work normally when help is shown. An open dialog takes
    /// every message until it is closed.
    pub fn update(&mut self, msg: Message) {
        if self.state.help_visible {
            match msg {
                Message::Quit => {
                    self.should_quit = true;
                }
                Message::ToggleHelp | Message::Escape => {
                    self.state.toggle_help();
                }
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        if self.state.dialog.is_some() {
            self.update_dialog(msg);
            return;
        }

        match msg {
            Message::Quit => {
                self.should_quit = true;
            }
            Message::Escape => {
                // Contextual escape: drag first, then notification, then selection
                if !self.state.cancel_drag() {
                    if self.state.notification.is_some() {
                        self.state.notification = None;
                    } else {
                        self.state.clear_selection();
                    }
                }
            }
            Message::NavigateLeft => self.state.navigate(Direction::Left),
            Message::NavigateRight => self.state.navigate(Direction::Right),
            Message::NavigateUp => self.state.navigate(Direction::Up),
            Message::NavigateDown => self.state.navigate(Direction::Down),
            Message::GrabOrDrop => self.grab_or_drop(),
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Refresh => self.refresh(),
            Message::CyclePriorityFilter | Message::CycleStatusFilter | Message::CycleTagFilter
                if !self.state.is_dragging() =>
            {
                match msg {
                    Message::CyclePriorityFilter => self.state.cycle_priority_filter(),
                    Message::CycleStatusFilter => self.state.cycle_status_filter(),
                    _ => self.state.cycle_tag_filter(),
                }
                self.state
                    .notify(Notification::info(format!("Showing {}", self.state.filter.describe())));
                self.refresh();
            }
            Message::Archive if !self.state.is_dragging() => {
                if let Some(task) = self.state.selected_task() {
                    self.send(StoreCommand::Archive(task.id));
                }
            }
            Message::UndoArchive if !self.state.is_dragging() => {
                match self.state.last_archived.clone() {
                    Some(task_id) => self.send(StoreCommand::Unarchive(task_id)),
                    None => self.state.notify(Notification::info("Nothing to restore")),
                }
            }
            Message::NewTask if !self.state.is_dragging() => {
                self.state.dialog = Some(Dialog::new_task(self.state.selected_column));
            }
            Message::EditTask if !self.state.is_dragging() => {
                if let Some(task) = self.state.selected_task() {
                    self.state.dialog = Some(Dialog::edit_title(task.id, &task.title));
                }
            }
            Message::DeleteTask if !self.state.is_dragging() => {
                if let Some(task) = self.state.selected_task() {
                    self.state.dialog = Some(Dialog::ConfirmDelete {
                        task_id: task.id,
                        title: task.title,
                    });
                }
            }
            Message::MouseDown { column, row } => self.mouse_down(column, row),
            Message::MouseDrag { column, row } => {
                if self.state.is_dragging() {
                    let hit = self.board_hit(column, row);
                    self.state.hover = self.state.target_at(hit);
                }
            }
            Message::MouseUp { column, row } => {
                if self.state.is_dragging() {
                    let hit = self.board_hit(column, row);
                    let target = self.state.target_at(hit);
                    let mut requested: Vec<StatusChange> = Vec::new();
                    let outcome = self.state.finish_drag(target, &mut requested);
                    self.forward(&outcome, requested);
                }
            }
            Message::CyclePriorityFilter
            | Message::CycleStatusFilter
            | Message::CycleTagFilter
            | Message::Archive
            | Message::UndoArchive
            | Message::NewTask
            | Message::EditTask
            | Message::DeleteTask => {
                debug!(?msg, "ignored while dragging");
            }
            Message::DialogInput { .. }
            | Message::DialogBackspace
            | Message::DialogConfirm
            | Message::DialogCancel => {
                debug!(?msg, "no dialog open");
            }
        }
    }

    fn update_dialog(&mut self, msg: Message) {
        match msg {
            Message::Quit => self.should_quit = true,
            Message::DialogCancel | Message::Escape => self.state.dialog = None,
            Message::DialogInput { ch } => {
                if let Some(input) = self.state.dialog.as_mut().and_then(Dialog::input_mut) {
                    input.insert_char(ch);
                }
            }
            Message::DialogBackspace => {
                if let Some(input) = self.state.dialog.as_mut().and_then(Dialog::input_mut) {
                    input.backspace();
                }
            }
            Message::DialogConfirm => self.confirm_dialog(),
            other => debug!(msg = ?other, "ignored while a dialog is open"),
        }
    }

    /// Acts on the open dialog. A prompt with a blank title stays open.
    fn confirm_dialog(&mut self) {
        let Some(dialog) = self.state.dialog.take() else {
            return;
        };
        let title = dialog
            .input()
            .map(|input| input.value().trim().to_string())
            .unwrap_or_default();
        if dialog.takes_text() && title.is_empty() {
            self.state
                .notify(Notification::error("A task needs a title"));
            self.state.dialog = Some(dialog);
            return;
        }

        match dialog {
            Dialog::NewTask { status, .. } => {
                self.send(StoreCommand::Create(NewTask {
                    status,
                    ..NewTask::titled(title)
                }));
            }
            Dialog::EditTitle { task_id, .. } => {
                let unchanged = self
                    .state
                    .tasks
                    .iter()
                    .any(|task| task.id == task_id && task.title == title);
                if !unchanged {
                    self.send(StoreCommand::Edit {
                        task_id,
                        update: TaskUpdate {
                            title: Some(title),
                            ..TaskUpdate::default()
                        },
                    });
                }
            }
            Dialog::ConfirmDelete { task_id, .. } => {
                self.send(StoreCommand::Delete(task_id));
            }
        }
    }

    /// Folds an event from the store worker into the state.
    pub fn handle_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Tasks(tasks) => {
                let report = self.state.set_tasks(tasks);
                if !report.diverged.is_empty() {
                    debug!(diverged = report.diverged.len(), "store disagrees with pending moves");
                }
            }
            StoreEvent::Stats(stats) => self.state.stats = stats,
            StoreEvent::Updated(task) => {
                self.state.notify(Notification::info(format!(
                    "Moved \"{}\" to {}",
                    task.title,
                    task.status.display_name()
                )));
            }
            StoreEvent::Created(task) => {
                self.state
                    .notify(Notification::info(format!("Created \"{}\"", task.title)));
                let task_id = task.id.clone();
                self.state.upsert_task(task);
                self.state.select(&task_id);
            }
            StoreEvent::Edited(task) => {
                self.state
                    .notify(Notification::info(format!("Saved \"{}\"", task.title)));
                self.state.upsert_task(task);
            }
            StoreEvent::Deleted(task) => {
                self.state
                    .notify(Notification::info(format!("Deleted \"{}\"", task.title)));
                self.state.remove_task(&task.id);
            }
            StoreEvent::Archived(task) => {
                self.state.notify(Notification::info(format!(
                    "Archived \"{}\" (u to undo)",
                    task.title
                )));
                self.state.last_archived = Some(task.id.clone());
                self.state.upsert_task(task);
            }
            StoreEvent::Unarchived(task) => {
                self.state
                    .notify(Notification::info(format!("Restored \"{}\"", task.title)));
                if self.state.last_archived.as_ref() == Some(&task.id) {
                    self.state.last_archived = None;
                }
                self.state.upsert_task(task);
            }
            StoreEvent::Failed {
                request,
                task_id,
                message,
            } => {
                if let FailedRequest::StatusUpdate(target) = request
                    && let Some(task_id) = &task_id
                {
                    self.state.status_update_failed(task_id, target);
                }
                self.state.notify(Notification::error(format!(
                    "{} failed: {message}",
                    request.action()
                )));
            }
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - Below the minimum dimensions, shows a "terminal too small" message.
    /// - Below `MIN_HEIGHT_WITH_HEADER`, hides the header to reclaim space.
    /// - Otherwise, renders header, board and status bar.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if is_too_small(area) {
            render_terminal_too_small(frame, area);
            return;
        }

        let layout = ScreenLayout::new(area);
        let columns = self.state.columns();
        let buf = frame.buffer_mut();

        if let Some(header) = layout.header {
            render_header(
                &self.state.stats,
                &self.state.filter,
                self.state.loading,
                header,
                buf,
            );
        }
        render_board(&BoardView::new(&self.state, &columns), layout.board, buf);
        render_status_bar(&self.state, layout.status_bar, buf);

        if let Some(dialog) = &self.state.dialog {
            render_dialog(dialog, area, buf);
        }
        if self.state.help_visible {
            render_help_overlay(self.state.is_dragging(), area, buf);
        }
    }

    /// Runs the main application loop.
    ///
    /// Draws, applies whatever the store worker sent since the last frame,
    /// then waits briefly for terminal input. Keys go to the open dialog, if
    /// any. On exit the worker is told to shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use tasklane_config::PollingConfig;
    /// use tasklane_store::MemoryStore;
    /// use tasklane_tui::{App, terminal, worker};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut handle = worker::spawn_worker(Arc::new(MemoryStore::new()), &PollingConfig::default());
    ///     let mut app = App::new(Default::default()).connect(handle.commands.clone());
    ///
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     app.run(&mut terminal, &mut handle.events).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(
        &mut self,
        terminal: &mut AppTerminal,
        events: &mut UnboundedReceiver<StoreEvent>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            while let Ok(event) = events.try_recv() {
                self.handle_store_event(event);
            }

            if let Some(event) = poll_event()? {
                let msg = match &self.state.dialog {
                    Some(dialog) => dialog_event_to_message(&event, dialog.takes_text()),
                    None => event_to_message(&event),
                };
                if let Some(msg) = msg {
                    self.update(msg);
                }
            }

            if self.should_quit {
                self.send(StoreCommand::Shutdown);
                break;
            }
        }

        Ok(())
    }

    fn grab_or_drop(&mut self) {
        if self.state.is_dragging() {
            let mut requested: Vec<StatusChange> = Vec::new();
            let outcome = self.state.drop_on_hover(&mut requested);
            self.forward(&outcome, requested);
            return;
        }
        if let Err(err) = self.state.grab_selected() {
            self.state.notify(Notification::error(err.to_string()));
        }
    }

    fn mouse_down(&mut self, column: u16, row: u16) {
        if self.state.is_dragging() {
            return;
        }
        match self.board_hit(column, row) {
            Hit::Card { status, index } => {
                self.state.selected_column = status;
                self.state.selected_task = Some(index);
                if let Some(task) = self.state.selected_task()
                    && let Err(err) = self.state.start_drag(task.id)
                {
                    self.state.notify(Notification::error(err.to_string()));
                }
            }
            Hit::Column(status) => {
                self.state.selected_column = status;
                self.state.selected_task = None;
            }
            Hit::Outside => {}
        }
    }

    /// Sends the status changes a drop produced to the store.
    fn forward(&mut self, outcome: &DropOutcome, requested: Vec<StatusChange>) {
        debug!(?outcome, "drop");
        for change in requested {
            self.send(StoreCommand::UpdateStatus {
                task_id: change.task_id,
                status: change.to,
            });
        }
    }

    fn refresh(&mut self) {
        self.state.loading = true;
        self.send(StoreCommand::Refresh(self.state.filter.clone()));
    }

    fn board_hit(&self, column: u16, row: u16) -> Hit {
        if is_too_small(self.last_area) {
            return Hit::Outside;
        }
        let layout = ScreenLayout::new(self.last_area);
        let columns = self.state.columns();
        BoardView::new(&self.state, &columns).hit(layout.board, column, row)
    }

    fn send(&mut self, command: StoreCommand) {
        let Some(commands) = &self.commands else {
            debug!(?command, "no store worker connected");
            return;
        };
        if commands.send(command).is_err() {
            warn!("store worker has stopped");
            self.state
                .notify(Notification::error("Store worker stopped"));
        }
    }
}

fn is_too_small(area: Rect) -> bool {
    area.height < MIN_HEIGHT || area.width < MIN_WIDTH
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}
