//! Configuration management for the tasklane application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`polling`]: Periodic refresh settings
//! - [`board`]: Optimistic move policies
//! - [`store`]: Task store settings
//! - [`logging`]: Log output settings
//! - [`env`]: Environment variable overrides
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Environment variables (`TASKLANE_*`)
//! 2. Local config (`./tasklane.json5` or `./tasklane.json`)
//! 3. User config (`~/.config/tasklane/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! # Example File
//!
//! ```json5
//! {
//!   polling: { interval_secs: 60, refresh_after_write: true },
//!   board: { drop_diverged_overrides: false, rollback_on_failure: true },
//!   store: { latency_ms: 300, seed_sample_tasks: true },
//!   logging: { level: "debug", file: "/tmp/tasklane.log" },
//! }
//! ```

pub mod board;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod polling;
pub mod store;

// Re-export primary types at crate root for convenience
pub use board::BoardConfig;
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use polling::PollingConfig;
pub use store::StoreConfig;
