//! Header bar: title, task counts and the active filter.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use tasklane_protocol::{TaskFilter, TaskStats};

const TITLE: &str = "tasklane - Task Board";
const HELP_CUE: &str = "Press ? for help";

/// Renders the header.
///
/// ```text
/// ╭──────────────────────────────────────────────────────────────╮
/// │tasklane - Task Board   8 tasks · 25% done · all tasks  Press ? for help│
/// ╰──────────────────────────────────────────────────────────────╯
/// ```
///
/// `loading` replaces the counts until the first task list arrives.
pub fn render_header(
    stats: &TaskStats,
    filter: &TaskFilter,
    loading: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    let [title_area, summary_area, help_area] = Layout::horizontal([
        Constraint::Length(TITLE.len() as u16 + 2),
        Constraint::Min(0),
        Constraint::Length(HELP_CUE.len() as u16),
    ])
    .areas(inner);

    Paragraph::new(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .render(title_area, buf);

    Paragraph::new(summary_line(stats, filter, loading))
        .centered()
        .render(summary_area, buf);

    Paragraph::new(Span::styled(
        HELP_CUE,
        Style::default().fg(Color::DarkGray),
    ))
    .right_aligned()
    .render(help_area, buf);
}

fn summary_line(stats: &TaskStats, filter: &TaskFilter, loading: bool) -> Line<'static> {
    if loading {
        return Line::from(Span::styled(
            "Loading…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    let done = stats.percentage_of_total(stats.done);
    Line::from(vec![
        Span::styled(
            format!("{} tasks", stats.total),
            Style::default().fg(Color::White),
        ),
        Span::styled(" · ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{done}% done"), Style::default().fg(Color::Green)),
        Span::styled(" · ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter.describe(), Style::default().fg(Color::Yellow)),
    ])
}
