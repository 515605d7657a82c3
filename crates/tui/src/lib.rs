//! Terminal UI for tasklane.
//!
//! A Ratatui board with four status columns. Tasks move between columns by
//! keyboard or mouse drag and drop; moves show up immediately and are
//! confirmed by the store in the background.
//!
//! # Overview
//!
//! - [`app`]: main application struct and run loop
//! - [`state`]: selection, drag hover, filters and notifications
//! - [`dialog`]: the new task, edit title and delete prompts
//! - [`worker`]: background task that talks to the store
//! - [`layout`]: screen measurements shared by rendering and hit-testing
//! - [`widgets`]: rendering
//! - [`terminal`]: terminal setup, teardown, and panic handling
//! - [`event`]: event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tasklane_config::Config;
//! use tasklane_store::MemoryStore;
//! use tasklane_tui::{App, terminal, worker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let mut handle = worker::spawn_worker(Arc::new(MemoryStore::new()), &config.polling);
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::with_config(&config).connect(handle.commands.clone());
//!     let result = app.run(&mut terminal, &mut handle.events).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod dialog;
pub mod event;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::AppState;
