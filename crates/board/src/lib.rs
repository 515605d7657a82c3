//! Drag-and-drop engine for the tasklane board.
//!
//! The store's task list is authoritative. On top of it the board keeps two
//! client-side overlays and one interaction state machine:
//!
//! - [`columns`]: partitions tasks into the four status columns
//! - [`optimistic`]: status overrides for moves the store has not confirmed
//! - [`reorder`]: manual orderings within a column
//! - [`drag`]: the drag state machine that writes both overlays
//! - [`board`]: [`BoardState`], which owns all of the above
//!
//! Rendering goes store list, optimistic overlay, partition, reorder.
//!
//! # Examples
//!
//! ```
//! use tasklane_board::{BoardState, DropTarget, StatusChange};
//! use tasklane_protocol::{Task, TaskId, TaskStatus};
//!
//! let tasks = vec![Task::with_id("a", "Write docs", "")];
//! let mut board = BoardState::default();
//! let mut sent = Vec::new();
//!
//! board.on_drag_start(TaskId::from("a"), &tasks).unwrap();
//! board.on_drag_end(
//!     Some(DropTarget::Column(TaskStatus::Done)),
//!     &tasks,
//!     &mut |change: StatusChange| sent.push(change),
//! );
//!
//! assert_eq!(sent.len(), 1);
//! assert_eq!(board.columns(&tasks).column(TaskStatus::Done).len(), 1);
//! ```

pub mod board;
pub mod columns;
pub mod drag;
pub mod optimistic;
pub mod reorder;

pub use board::{BoardState, OverlayPolicy, StatusChangeSink};
pub use columns::Columns;
pub use drag::{DragController, DragError, DragState, DropOutcome, DropTarget, StatusChange};
pub use optimistic::{DivergencePolicy, OptimisticOverlay, PendingMove, ReconcileReport};
pub use reorder::LocalReorder;
