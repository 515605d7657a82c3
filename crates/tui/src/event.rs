//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tasklane_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `None` if the event is not handled. Key releases and repeats are
/// ignored so a single press never fires twice.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only the left button is used: pressing it on a card starts a drag, moving
/// it updates the drop target and releasing it ends the drag.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::MouseDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::MouseDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::MouseUp { column, row }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Cancel drag, close help, or clear selection |
/// | `Left` / `Right` | Select column (or move the drop target) |
/// | `Up` / `Down` | Select task (or move the drop target) |
/// | `Enter` or `Space` | Grab the selected task, or drop it |
/// | `n` | New task in the selected column |
/// | `e` | Edit the selected task's title |
/// | `d` | Delete the selected task (asks first) |
/// | `a` | Archive selected task |
/// | `u` | Undo the last archive |
/// | `p` | Cycle priority filter |
/// | `s` | Cycle status filter |
/// | `t` | Cycle tag filter |
/// | `r` | Refresh |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::GrabOrDrop),

        KeyCode::Char('n') => Some(Message::NewTask),
        KeyCode::Char('e') => Some(Message::EditTask),
        KeyCode::Char('d') => Some(Message::DeleteTask),
        KeyCode::Char('a') => Some(Message::Archive),
        KeyCode::Char('u') => Some(Message::UndoArchive),

        KeyCode::Char('p') => Some(Message::CyclePriorityFilter),
        KeyCode::Char('s') => Some(Message::CycleStatusFilter),
        KeyCode::Char('t') => Some(Message::CycleTagFilter),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts an event to a message while a dialog is open.
///
/// The mouse does nothing until the dialog is closed.
#[must_use]
pub fn dialog_event_to_message(event: &Event, takes_text: bool) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_to_dialog_message(*key, takes_text)
        }
        _ => None,
    }
}

/// Converts a key event to a dialog message.
///
/// # Key Bindings (Dialog Mode)
///
/// | Key | Text prompt | Confirmation |
/// |-----|-------------|--------------|
/// | `Ctrl+C` | Quit | Quit |
/// | `Enter` | Confirm | Confirm |
/// | `Esc` | Cancel | Cancel |
/// | `Backspace` | Delete character | - |
/// | `y` / `n` | Input | Confirm / Cancel |
/// | Any char | Input | - |
#[must_use]
pub fn key_to_dialog_message(key: KeyEvent, takes_text: bool) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Message::DialogConfirm),
        KeyCode::Esc => Some(Message::DialogCancel),
        KeyCode::Backspace if takes_text => Some(Message::DialogBackspace),
        KeyCode::Char(ch) if takes_text => Some(Message::DialogInput { ch }),
        KeyCode::Char('y' | 'Y') => Some(Message::DialogConfirm),
        KeyCode::Char('n' | 'N') => Some(Message::DialogCancel),
        _ => None,
    }
}
