//! Help overlay widget.
//!
//! Lists the key bindings when the user presses `?`. While a card is being
//! dragged the drag and drop section is marked, since those are the only
//! keys that act on the board until the card is dropped.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 44;

/// One titled group of bindings.
struct Section {
    title: &'static str,
    drag: bool,
    entries: &'static [(&'static str, &'static str)],
}

const SECTIONS: &[Section] = &[
    Section {
        title: "Navigation",
        drag: false,
        entries: &[("←→↑↓", "Select column / task")],
    },
    Section {
        title: "Drag and drop",
        drag: true,
        entries: &[
            ("Space", "Grab / drop task"),
            ("←→↑↓", "Move drop target"),
            ("Esc", "Cancel drag"),
            ("Mouse", "Press, move, release"),
        ],
    },
    Section {
        title: "Tasks",
        drag: false,
        entries: &[
            ("n", "New task in column"),
            ("e", "Edit title"),
            ("d", "Delete (asks first)"),
            ("a", "Archive"),
            ("u", "Undo last archive"),
        ],
    },
    Section {
        title: "Board",
        drag: false,
        entries: &[
            ("p s t", "Filter priority, status, tag"),
            ("r", "Refresh"),
            ("Ctrl+C", "Quit"),
        ],
    },
];

/// Renders a centered help overlay displaying all keybindings.
///
/// The panel is as tall as its content and is clamped to `area`. With
/// `dragging` set, the drag and drop header is highlighted.
///
/// # Layout
///
/// ```text
/// ╭ Help ──────────────────────────────────╮
/// │  Navigation                            │
/// │  ←→↑↓       Select column / task       │
/// │                                        │
/// │  Drag and drop                         │
/// │  Space      Grab / drop task           │
/// │  ...                                   │
/// │                                        │
/// │  Press any key to close                │
/// ╰────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasklane_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_help_overlay(false, area, &mut buf);
/// ```
pub fn render_help_overlay(dragging: bool, area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines(dragging);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup_area = centered(HELP_WIDTH, height, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(lines)
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

fn build_help_lines(dragging: bool) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let active_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for section in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let header = if dragging && section.drag {
            Span::styled(format!("  {} ◀", section.title), active_style)
        } else {
            Span::styled(format!("  {}", section.title), header_style)
        };
        lines.push(Line::from(header));
        lines.extend(section.entries.iter().map(|(key, text)| {
            Line::from(vec![
                Span::styled(format!("  {key:<11}"), key_style),
                Span::styled(*text, text_style),
            ])
        }));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}
