//! tasklane - a terminal kanban board.
//!
//! Loads the configuration, starts the store worker over an in-memory
//! store, and runs the board until the user quits.
//!
//! ```bash
//! # Log to a file; the terminal belongs to the board
//! TASKLANE_LOG=debug TASKLANE_LOG_FILE=/tmp/tasklane.log cargo run
//! ```

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tasklane_config::{Config, LoggingConfig};
use tasklane_protocol::dummy::sample_tasks;
use tasklane_store::MemoryStore;
use tasklane_tui::{App, terminal, worker};
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Held until exit so buffered log lines are flushed.
    let _log_guard = init_logging(&config.logging);
    tracing::info!(
        refresh_secs = config.polling.interval_secs,
        "tasklane starting"
    );

    let store = if config.store.seed_sample_tasks {
        MemoryStore::with_tasks(sample_tasks())
    } else {
        MemoryStore::new()
    }
    .with_latency(config.store.latency());
    let mut handle = worker::spawn_worker(Arc::new(store), &config.polling);

    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::with_config(&config).connect(handle.commands.clone());
    let result = app.run(&mut terminal, &mut handle.events).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    if let Err(err) = handle.join.await {
        tracing::warn!(%err, "store worker ended abnormally");
    }
    tracing::info!("tasklane stopped");

    result
}

/// Sends logs to the configured file, if any.
///
/// Nothing is logged without a file, since the board owns stdout. A file
/// that cannot be written is reported on stderr before the board takes
/// over the terminal, and logging stays off.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    if !config.is_enabled() {
        return None;
    }
    let path = config.file.as_deref()?;
    let (dir, file_name) = match log_target(path) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("tasklane: logging disabled: {err:#}");
            return None;
        }
    };

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Splits a log file path into its directory and file name, creating the
/// directory and the file so a bad path fails here rather than in the
/// appender.
fn log_target(path: &Path) -> anyhow::Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("{} does not name a file", path.display()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(file_name))
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    Ok((dir, file_name.to_os_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_target_creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs/nested/tasklane.log");

        let (dir, name) = log_target(&path).unwrap();

        assert_eq!(dir, tmp.path().join("logs/nested"));
        assert_eq!(name, "tasklane.log");
        assert!(path.is_file());
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        for path in ["/", "logs/.."] {
            let err = log_target(Path::new(path)).unwrap_err();
            assert!(err.to_string().contains("does not name a file"), "{path}");
        }
    }

    #[test]
    fn unwritable_location_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = log_target(&blocker.join("tasklane.log")).unwrap_err();

        assert!(err.to_string().contains("cannot create log directory"));
    }
}
