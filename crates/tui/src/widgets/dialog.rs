//! Dialog popup widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::dialog::Dialog;
use crate::layout::centered;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 5;

/// Renders the open dialog centered over `area`.
///
/// Prompts show the text typed so far with `_` at the cursor; the delete
/// confirmation shows the task's title.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use tasklane_protocol::TaskStatus;
/// use tasklane_tui::dialog::Dialog;
/// use tasklane_tui::widgets::render_dialog;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_dialog(&Dialog::new_task(TaskStatus::Todo), area, &mut buf);
/// ```
pub fn render_dialog(dialog: &Dialog, area: Rect, buf: &mut Buffer) {
    let popup_area = centered(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", dialog.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    Paragraph::new(dialog_lines(dialog))
        .block(block)
        .render(popup_area, buf);
}

fn dialog_lines(dialog: &Dialog) -> Vec<Line<'static>> {
    let hint_style = Style::default().fg(Color::DarkGray);
    match dialog {
        Dialog::NewTask { input, .. } | Dialog::EditTitle { input, .. } => {
            let (before, after) = input.value().split_at(input.cursor());
            vec![
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Yellow)),
                    Span::raw(before.to_string()),
                    Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                    Span::raw(after.to_string()),
                ]),
                Line::from(""),
                Line::from(Span::styled("Enter: save | Esc: cancel", hint_style)),
            ]
        }
        Dialog::ConfirmDelete { title, .. } => vec![
            Line::from(format!("Delete \"{title}\"?")),
            Line::from(Span::styled(
                "This cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled("y: delete | n: keep", hint_style)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use tasklane_protocol::{TaskId, TaskStatus};

    fn render(dialog: &Dialog) -> String {
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        render_dialog(dialog, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn snapshot_new_task_prompt() {
        let mut dialog = Dialog::new_task(TaskStatus::InProgress);
        for ch in "Ship".chars() {
            dialog.input_mut().unwrap().insert_char(ch);
        }

        insta::assert_snapshot!(render(&dialog), @r"
        ╭ New task in In Progress ───────────────────────╮
        │> Ship_                                         │
        │                                                │
        │Enter: save | Esc: cancel                       │
        ╰────────────────────────────────────────────────╯
        ");
    }

    #[test]
    fn cursor_marker_follows_the_cursor() {
        let mut dialog = Dialog::edit_title(TaskId::from("a"), "ab");
        let input = dialog.input_mut().unwrap();
        input.backspace();
        input.insert_char('c');

        assert!(render(&dialog).contains("> ac_"));
    }

    #[test]
    fn confirmation_names_the_task() {
        let dialog = Dialog::ConfirmDelete {
            task_id: TaskId::from("a"),
            title: "Write docs".to_string(),
        };

        let content = render(&dialog);
        assert!(content.contains("Delete task"));
        assert!(content.contains("Delete \"Write docs\"?"));
        assert!(content.contains("y: delete | n: keep"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        render_dialog(&Dialog::new_task(TaskStatus::Done), area, &mut buf);
    }
}
