//! The full board: four columns side by side.

use ratatui::{buffer::Buffer, layout::Rect};
use tasklane_board::{Columns, DropTarget};
use tasklane_protocol::{Task, TaskStatus};

use crate::layout::{Hit, card_area, column_areas, scroll_offset, visible_cards};
use crate::state::AppState;
use crate::widgets::column::{ColumnHighlight, render_column};
use crate::widgets::task_card::CardStyle;

/// What the board widgets need to know about the state.
///
/// Rendering and hit-testing share it so both agree on scrolling.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    state: &'a AppState,
    columns: &'a Columns,
}

impl<'a> BoardView<'a> {
    /// Creates a view of `columns`, as computed from `state`.
    #[must_use]
    pub fn new(state: &'a AppState, columns: &'a Columns) -> Self {
        Self { state, columns }
    }

    /// Returns the displayed columns.
    #[must_use]
    pub fn columns(&self) -> &'a Columns {
        self.columns
    }

    /// Returns the card index a column must keep visible.
    ///
    /// While dragging this is the hovered card, otherwise the selection.
    #[must_use]
    pub fn focus(&self, status: TaskStatus) -> Option<usize> {
        if self.state.is_dragging() {
            return match self.state.hover_position(self.columns) {
                Some((hovered, index)) if hovered == status => index,
                _ => None,
            };
        }
        if status == self.state.selected_column {
            self.state.selected_task
        } else {
            None
        }
    }

    /// Returns how a column border is highlighted.
    #[must_use]
    pub fn column_highlight(&self, status: TaskStatus) -> ColumnHighlight {
        if self.state.hover == Some(DropTarget::Column(status)) {
            ColumnHighlight::DropZone
        } else if status == self.state.selected_column {
            ColumnHighlight::Selected
        } else {
            ColumnHighlight::None
        }
    }

    /// Returns how a card is drawn.
    #[must_use]
    pub fn card_style(&self, status: TaskStatus, index: usize, task: &Task) -> CardStyle {
        if self.state.board.dragged() == Some(&task.id) {
            return CardStyle::Dragged;
        }
        if let Some(DropTarget::Task(hovered)) = &self.state.hover
            && *hovered == task.id
        {
            return CardStyle::DropTarget;
        }
        let selected =
            status == self.state.selected_column && self.state.selected_task == Some(index);
        if selected && !self.state.is_dragging() {
            CardStyle::Selected
        } else {
            CardStyle::Normal
        }
    }

    /// Returns whether a task has a move the store has not confirmed.
    #[must_use]
    pub fn is_pending(&self, task: &Task) -> bool {
        self.state.board.pending(&task.id).is_some()
    }

    /// Returns the first card shown in a column of the given area.
    #[must_use]
    pub fn first_visible(&self, status: TaskStatus, area: Rect) -> usize {
        scroll_offset(self.focus(status), visible_cards(area))
    }

    /// Finds what lies under a screen position, for a board drawn in `area`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratatui::layout::Rect;
    /// use tasklane_board::BoardState;
    /// use tasklane_protocol::{Task, TaskStatus};
    /// use tasklane_tui::AppState;
    /// use tasklane_tui::layout::Hit;
    /// use tasklane_tui::widgets::BoardView;
    ///
    /// let mut state = AppState::new(BoardState::default());
    /// state.set_tasks(vec![Task::with_id("a", "A", "")]);
    /// let columns = state.columns();
    /// let view = BoardView::new(&state, &columns);
    /// let area = Rect::new(0, 0, 80, 20);
    ///
    /// assert_eq!(view.hit(area, 5, 2), Hit::Card { status: TaskStatus::Todo, index: 0 });
    /// assert_eq!(view.hit(area, 5, 10), Hit::Column(TaskStatus::Todo));
    /// assert_eq!(view.hit(area, 45, 2), Hit::Column(TaskStatus::CodeReview));
    /// assert_eq!(view.hit(area, 5, 30), Hit::Outside);
    /// ```
    #[must_use]
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> Hit {
        if !area.contains((column, row).into()) {
            return Hit::Outside;
        }
        for (status, column_area) in TaskStatus::all().into_iter().zip(column_areas(area)) {
            if !column_area.contains((column, row).into()) {
                continue;
            }
            let first = self.first_visible(status, column_area);
            let count = self.columns.column(status).len();
            let slot = (0..visible_cards(column_area)).find(|&slot| {
                card_area(column_area, slot).is_some_and(|card| card.contains((column, row).into()))
            });
            return match slot {
                Some(slot) if first + slot < count => Hit::Card {
                    status,
                    index: first + slot,
                },
                _ => Hit::Column(status),
            };
        }
        Hit::Outside
    }
}

/// Renders the four columns side by side.
pub fn render_board(view: &BoardView<'_>, area: Rect, buf: &mut Buffer) {
    for (status, column_area) in TaskStatus::all().into_iter().zip(column_areas(area)) {
        render_column(view, status, column_area, buf);
    }
}
