//! Status bar rendering widget.
//!
//! Shows the latest notification, or key hints for what the user can do
//! right now.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::{AppState, NotificationLevel};

const IDLE_HINTS: [(&str, &str); 6] = [
    ("←→↑↓", "select"),
    ("Space", "grab"),
    ("n", "new"),
    ("d", "delete"),
    ("p/s/t", "filter"),
    ("?", "help"),
];

const DRAG_HINTS: [(&str, &str); 4] = [
    ("←→", "column"),
    ("↑↓", "target"),
    ("Space", "drop"),
    ("Esc", "cancel"),
];

/// Renders the status bar.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasklane_board::BoardState;
/// use tasklane_tui::AppState;
/// use tasklane_tui::widgets::render_status_bar;
///
/// let state = AppState::new(BoardState::default());
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(&state, area, &mut buf);
/// ```
pub fn render_status_bar(state: &AppState, area: Rect, buf: &mut Buffer) {
    Paragraph::new(status_line(state)).render(area, buf);
}

fn status_line(state: &AppState) -> Line<'static> {
    if let Some(notification) = &state.notification {
        let color = match notification.level {
            NotificationLevel::Info => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        return Line::from(Span::styled(
            notification.text.clone(),
            Style::default().fg(color),
        ));
    }

    let Some(dragged) = state.board.dragged() else {
        return hints(&IDLE_HINTS, Vec::new());
    };
    let title = state
        .tasks
        .iter()
        .find(|task| task.id == *dragged)
        .map_or_else(|| dragged.to_string(), |task| task.title.clone());
    let prefix = vec![
        Span::styled("Moving ", Style::default().fg(Color::White)),
        Span::styled(
            title,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    hints(&DRAG_HINTS, prefix)
}

fn hints(pairs: &[(&'static str, &'static str)], mut spans: Vec<Span<'static>>) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::DarkGray);
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {action}"), text_style));
    }
    Line::from(spans)
}
