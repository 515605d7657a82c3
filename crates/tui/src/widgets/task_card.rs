//! Task card rendering widget.
//!
//! Cards are color coded by priority; drag state overrides the border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasklane_protocol::{Task, TaskPriority};

/// How a card is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardStyle {
    /// No highlight.
    #[default]
    Normal,
    /// The selected card, outside of a drag.
    Selected,
    /// The card being dragged.
    Dragged,
    /// The card the dragged one would be dropped before.
    DropTarget,
}

/// Returns the border color for a priority.
///
/// # Examples
///
/// ```
/// use ratatui::style::Color;
/// use tasklane_protocol::TaskPriority;
/// use tasklane_tui::widgets::priority_color;
///
/// assert_eq!(priority_color(TaskPriority::Low), Color::DarkGray);
/// assert_eq!(priority_color(TaskPriority::Critical), Color::Red);
/// ```
#[must_use]
pub const fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::DarkGray,
        TaskPriority::Medium => Color::Blue,
        TaskPriority::High => Color::Yellow,
        TaskPriority::Critical => Color::Red,
    }
}

/// Renders a task card to the buffer.
///
/// ```text
/// ╭────────────────╮
/// │ Title          │
/// │ High #backend  │
/// ╰────────────────╯
/// ```
///
/// `pending` marks a card whose move the store has not confirmed yet.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasklane_protocol::Task;
/// use tasklane_tui::widgets::{CardStyle, render_task_card};
///
/// let task = Task::new("Implement feature", "Add new functionality");
/// let area = Rect::new(0, 0, 20, 4);
/// let mut buf = Buffer::empty(area);
///
/// render_task_card(&task, CardStyle::Normal, false, area, &mut buf);
/// ```
pub fn render_task_card(
    task: &Task,
    style: CardStyle,
    pending: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let color = priority_color(task.priority);
    let (border_type, border_style) = match style {
        CardStyle::Normal => (BorderType::Rounded, Style::default().fg(color)),
        CardStyle::Selected => (
            BorderType::Thick,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        CardStyle::Dragged => (
            BorderType::Double,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        CardStyle::DropTarget => (
            BorderType::Rounded,
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
    };
    let title_style = match style {
        CardStyle::Normal => Style::default().fg(Color::White),
        CardStyle::Dragged => Style::default().fg(Color::DarkGray),
        CardStyle::Selected | CardStyle::DropTarget => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    };

    let mut meta = Vec::with_capacity(task.tags.len() + 2);
    if pending {
        meta.push(Span::styled("⟳ ", Style::default().fg(Color::LightBlue)));
    }
    meta.push(Span::styled(
        task.priority.display_name(),
        Style::default().fg(color),
    ));
    meta.extend(
        task.tags
            .iter()
            .map(|tag| Span::styled(format!(" #{tag}"), Style::default().fg(Color::DarkGray))),
    );

    let card = Paragraph::new(vec![
        Line::from(Span::styled(task.title.as_str(), title_style)),
        Line::from(meta),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style),
    );

    card.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn priority_color_mapping() {
        assert_eq!(priority_color(TaskPriority::Low), Color::DarkGray);
        assert_eq!(priority_color(TaskPriority::Medium), Color::Blue);
        assert_eq!(priority_color(TaskPriority::High), Color::Yellow);
        assert_eq!(priority_color(TaskPriority::Critical), Color::Red);
    }

    #[test]
    fn card_shows_title_priority_and_tags() {
        let task = Task::with_id("a", "Fix login", "")
            .with_priority(TaskPriority::High)
            .with_tags(["auth"]);
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardStyle::Normal, false, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Fix login"));
        assert!(content.contains("High #auth"));
        assert!(!content.contains('⟳'));
    }

    #[test]
    fn pending_card_is_marked() {
        let task = Task::with_id("a", "Fix login", "");
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardStyle::Normal, true, area, &mut buf);

        assert!(buffer_to_string(&buf).contains("⟳ Medium"));
    }

    #[test]
    fn dragged_card_has_double_border() {
        let task = Task::with_id("a", "Fix login", "");
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardStyle::Dragged, false, area, &mut buf);

        let corner = buf.cell((0, 0)).expect("cell should exist");
        assert_eq!(corner.symbol(), "╔");
        assert_eq!(corner.fg, Color::Magenta);
    }

    #[test]
    fn render_task_card_handles_small_area() {
        let task = Task::new("Test Task", "A description");
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, CardStyle::Selected, false, area, &mut buf);
    }
}
