//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use tasklane_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(matches!(msg, Message::NavigateRight));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection (or the drag hover) to the left column.
    NavigateLeft,
    /// Move selection (or the drag hover) to the right column.
    NavigateRight,
    /// Move selection (or the drag hover) up within the column.
    NavigateUp,
    /// Move selection (or the drag hover) down within the column.
    NavigateDown,
    /// Grab the selected task, or drop the grabbed one on the hovered target.
    GrabOrDrop,
    /// Cancel the drag, or close the help overlay.
    Escape,
    /// Quit the application.
    Quit,
    /// Re-fetch tasks from the store.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,
    /// Cycle the priority filter: none, low, medium, high, critical.
    CyclePriorityFilter,
    /// Cycle the status filter: none, then each status in workflow order.
    CycleStatusFilter,
    /// Cycle the tag filter through the tags seen on the board.
    CycleTagFilter,
    /// Archive the selected task.
    Archive,
    /// Restore the most recently archived task.
    UndoArchive,
    /// Open a prompt for a new task in the selected column.
    NewTask,
    /// Open a prompt to rename the selected task.
    EditTask,
    /// Ask to delete the selected task.
    DeleteTask,
    /// Character typed into the open prompt.
    DialogInput {
        /// The character typed.
        ch: char,
    },
    /// Delete the character before the prompt cursor.
    DialogBackspace,
    /// Accept the open dialog.
    DialogConfirm,
    /// Close the open dialog without acting.
    DialogCancel,
    /// Left mouse button pressed at coordinates (column, row).
    MouseDown {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Mouse moved with the left button held, at coordinates (column, row).
    MouseDrag {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Left mouse button released at coordinates (column, row).
    MouseUp {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::NavigateUp.is_navigation());
    /// assert!(!Message::GrabOrDrop.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message is part of a drag gesture.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::Message;
    ///
    /// assert!(Message::GrabOrDrop.is_drag_gesture());
    /// assert!(Message::MouseUp { column: 1, row: 2 }.is_drag_gesture());
    /// assert!(!Message::Refresh.is_drag_gesture());
    /// ```
    #[must_use]
    pub fn is_drag_gesture(&self) -> bool {
        matches!(
            self,
            Self::GrabOrDrop
                | Self::MouseDown { .. }
                | Self::MouseDrag { .. }
                | Self::MouseUp { .. }
        )
    }

    /// Returns `true` if this message asks the store for a mutation or data.
    ///
    /// Messages that only open a dialog do not count; confirming it does.
    #[must_use]
    pub fn touches_store(&self) -> bool {
        matches!(
            self,
            Self::Refresh
                | Self::Archive
                | Self::UndoArchive
                | Self::CyclePriorityFilter
                | Self::CycleStatusFilter
                | Self::CycleTagFilter
                | Self::DialogConfirm
        )
    }

    /// Returns `true` if this message belongs to an open dialog.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklane_protocol::Message;
    ///
    /// assert!(Message::DialogInput { ch: 'x' }.is_dialog());
    /// assert!(!Message::NewTask.is_dialog());
    /// ```
    #[must_use]
    pub fn is_dialog(&self) -> bool {
        matches!(
            self,
            Self::DialogInput { .. }
                | Self::DialogBackspace
                | Self::DialogConfirm
                | Self::DialogCancel
        )
    }
}
