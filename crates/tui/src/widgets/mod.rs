//! Widget components for the tasklane TUI.
//!
//! Each widget is a plain function that renders state into a buffer, which
//! keeps them easy to test and compose.
//!
//! # Modules
//!
//! - [`board`]: the four columns, plus mouse hit-testing
//! - [`column`]: one column with its cards
//! - [`task_card`]: a single card, colored by priority
//! - [`header`]: title, task counts and active filter
//! - [`status_bar`]: key hints or the latest notification
//! - [`help`]: the keybinding overlay
//! - [`dialog`]: task prompts and the delete confirmation
//!
//! # Card Colors
//!
//! | Priority | Border |
//! |----------|--------|
//! | `Low` | Gray (`Color::DarkGray`) |
//! | `Medium` | Blue (`Color::Blue`) |
//! | `High` | Yellow (`Color::Yellow`) |
//! | `Critical` | Red (`Color::Red`) |
//!
//! A dragged card gets a magenta double border, the hovered drop target a
//! green one. Cards whose move the store has not confirmed yet show `⟳`.
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use tasklane_board::BoardState;
//! use tasklane_protocol::Task;
//! use tasklane_tui::AppState;
//! use tasklane_tui::widgets::{BoardView, render_board};
//!
//! let mut state = AppState::new(BoardState::default());
//! state.set_tasks(vec![Task::with_id("a", "Example", "")]);
//!
//! let area = Rect::new(0, 0, 80, 20);
//! let mut buf = Buffer::empty(area);
//! let columns = state.columns();
//!
//! render_board(&BoardView::new(&state, &columns), area, &mut buf);
//! ```

pub mod board;
pub mod column;
pub mod dialog;
pub mod header;
pub mod help;
pub mod status_bar;
pub mod task_card;

pub use board::{BoardView, render_board};
pub use column::{ColumnHighlight, render_column};
pub use dialog::render_dialog;
pub use header::render_header;
pub use help::render_help_overlay;
pub use status_bar::render_status_bar;
pub use task_card::{CardStyle, priority_color, render_task_card};
