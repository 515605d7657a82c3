//! Column rendering widget.
//!
//! A column shows its name and task count, then as many cards as fit,
//! scrolled so the focused card stays visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasklane_protocol::TaskStatus;

use crate::layout::{card_area, visible_cards};
use crate::widgets::board::BoardView;
use crate::widgets::task_card::render_task_card;

/// How a column border is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnHighlight {
    /// Neither selected nor hovered.
    #[default]
    None,
    /// The selected column.
    Selected,
    /// Hovered as a drop zone during a drag.
    DropZone,
}

/// Renders one column and its visible cards.
///
/// ```text
/// ╭ In Progress (2) ─╮
/// │╭────────────────╮│
/// ││ Task 1         ││
/// ││ High #api      ││
/// │╰────────────────╯│
/// ╰─────── +1 more ──╯
/// ```
pub fn render_column(view: &BoardView<'_>, status: TaskStatus, area: Rect, buf: &mut Buffer) {
    let tasks = view.columns().column(status);
    let border_style = match view.column_highlight(status) {
        ColumnHighlight::None => Style::default().fg(Color::DarkGray),
        ColumnHighlight::Selected => Style::default().fg(Color::Cyan),
        ColumnHighlight::DropZone => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    };
    let title_style = if border_style.fg == Some(Color::DarkGray) {
        Style::default().fg(Color::White)
    } else {
        border_style.add_modifier(Modifier::BOLD)
    };

    let visible = visible_cards(area);
    let hidden = tasks.len().saturating_sub(visible);

    let mut block = Block::default()
        .title(Span::styled(
            format!(" {} ({}) ", status.display_name(), tasks.len()),
            title_style,
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    if hidden > 0 {
        block = block.title_bottom(Line::from(format!(" +{hidden} more ")).right_aligned());
    }

    let inner = block.inner(area);
    block.render(area, buf);

    if tasks.is_empty() {
        render_empty_placeholder(view.column_highlight(status), inner, buf);
        return;
    }

    let first = view.first_visible(status, area);
    for (slot, (index, task)) in tasks.iter().enumerate().skip(first).take(visible).enumerate() {
        let Some(card) = card_area(area, slot) else {
            break;
        };
        render_task_card(
            task,
            view.card_style(status, index, task),
            view.is_pending(task),
            card,
            buf,
        );
    }
}

fn render_empty_placeholder(highlight: ColumnHighlight, area: Rect, buf: &mut Buffer) {
    let (text, style) = if highlight == ColumnHighlight::DropZone {
        ("Drop here", Style::default().fg(Color::LightGreen))
    } else {
        (
            "No tasks",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    };
    Paragraph::new(Line::from(Span::styled(text, style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::test_utils::buffer_to_string;
    use tasklane_board::{BoardState, DropTarget};
    use tasklane_protocol::Task;

    fn render(state: &AppState, status: TaskStatus, area: Rect) -> String {
        let columns = state.columns();
        let view = BoardView::new(state, &columns);
        let mut buf = Buffer::empty(area);
        render_column(&view, status, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn render_empty_column() {
        let state = AppState::new(BoardState::default());
        let content = render(&state, TaskStatus::Done, Rect::new(0, 0, 20, 12));

        assert!(content.contains("Done (0)"));
        assert!(content.contains("No tasks"));
    }

    #[test]
    fn hovered_empty_column_invites_a_drop() {
        let mut state = AppState::new(BoardState::default());
        state.hover = Some(DropTarget::Column(TaskStatus::Done));
        let content = render(&state, TaskStatus::Done, Rect::new(0, 0, 20, 12));

        assert!(content.contains("Drop here"));
    }

    #[test]
    fn overflow_is_counted() {
        let mut state = AppState::new(BoardState::default());
        state.set_tasks(
            (0..5)
                .map(|i| Task::with_id(format!("t{i}"), format!("Task {i}"), ""))
                .collect(),
        );
        let content = render(&state, TaskStatus::Todo, Rect::new(0, 0, 24, 12));

        assert!(content.contains("To Do (5)"));
        assert!(content.contains("Task 0"));
        assert!(content.contains("Task 1"));
        assert!(!content.contains("Task 2"));
        assert!(content.contains("+3 more"));
    }

    #[test]
    fn selection_scrolls_the_column() {
        let mut state = AppState::new(BoardState::default());
        state.set_tasks(
            (0..5)
                .map(|i| Task::with_id(format!("t{i}"), format!("Task {i}"), ""))
                .collect(),
        );
        state.selected_task = Some(4);
        let content = render(&state, TaskStatus::Todo, Rect::new(0, 0, 24, 12));

        assert!(!content.contains("Task 0"));
        assert!(content.contains("Task 3"));
        assert!(content.contains("Task 4"));
    }
}
