//! Modal dialogs over the board.
//!
//! A dialog takes every key until it is confirmed or cancelled. Prompts
//! collect a line of text; the delete confirmation only takes yes or no.

use tasklane_protocol::{TaskId, TaskStatus};

/// A single-line text buffer with a cursor.
///
/// The cursor is a byte offset that always sits on a character boundary.
///
/// # Examples
///
/// ```
/// use tasklane_tui::dialog::TextInput;
///
/// let mut input = TextInput::new("Fix");
/// input.insert_char('!');
/// assert_eq!(input.value(), "Fix!");
///
/// input.backspace();
/// input.backspace();
/// assert_eq!(input.value(), "Fi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a buffer holding `value`, with the cursor at the end.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Returns the text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the cursor position in bytes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }
}

/// The open dialog, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Title for a task to create in `status`.
    NewTask {
        /// The column the task will land in.
        status: TaskStatus,
        /// The title typed so far.
        input: TextInput,
    },
    /// New title for an existing task.
    EditTitle {
        /// The task being renamed.
        task_id: TaskId,
        /// The title, prefilled with the current one.
        input: TextInput,
    },
    /// Asks before deleting a task.
    ConfirmDelete {
        /// The task to delete.
        task_id: TaskId,
        /// Its title, for the question.
        title: String,
    },
}

impl Dialog {
    /// Opens an empty prompt for a new task in `status`.
    #[must_use]
    pub fn new_task(status: TaskStatus) -> Self {
        Self::NewTask {
            status,
            input: TextInput::default(),
        }
    }

    /// Opens a prompt prefilled with the task's title.
    #[must_use]
    pub fn edit_title(task_id: TaskId, title: &str) -> Self {
        Self::EditTitle {
            task_id,
            input: TextInput::new(title),
        }
    }

    /// Returns `true` if the dialog collects text.
    #[must_use]
    pub fn takes_text(&self) -> bool {
        self.input().is_some()
    }

    /// Returns the text buffer of a prompt.
    #[must_use]
    pub fn input(&self) -> Option<&TextInput> {
        match self {
            Self::NewTask { input, .. } | Self::EditTitle { input, .. } => Some(input),
            Self::ConfirmDelete { .. } => None,
        }
    }

    /// Returns the text buffer of a prompt, mutably.
    pub fn input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::NewTask { input, .. } | Self::EditTitle { input, .. } => Some(input),
            Self::ConfirmDelete { .. } => None,
        }
    }

    /// The dialog's title line.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::NewTask { status, .. } => format!("New task in {}", status.display_name()),
            Self::EditTitle { .. } => "Edit title".to_string(),
            Self::ConfirmDelete { .. } => "Delete task".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_handles_multibyte_characters() {
        let mut input = TextInput::default();
        input.insert_char('é');
        input.insert_char('x');
        assert_eq!(input.cursor(), 3);

        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);

        // Nothing left to delete.
        input.backspace();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn edit_prompt_starts_with_current_title() {
        let dialog = Dialog::edit_title(TaskId::from("a"), "Write docs");
        let input = dialog.input().unwrap();
        assert_eq!(input.value(), "Write docs");
        assert_eq!(input.cursor(), "Write docs".len());
        assert_eq!(dialog.title(), "Edit title");
    }

    #[test]
    fn only_prompts_take_text() {
        assert!(Dialog::new_task(TaskStatus::Done).takes_text());
        let mut confirm = Dialog::ConfirmDelete {
            task_id: TaskId::from("a"),
            title: "A".to_string(),
        };
        assert!(!confirm.takes_text());
        assert!(confirm.input_mut().is_none());
        assert_eq!(Dialog::new_task(TaskStatus::Done).title(), "New task in Done");
    }
}
