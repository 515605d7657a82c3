//! Terminal setup and teardown.
//!
//! The board needs raw mode, the alternate screen and mouse capture (for
//! drag and drop). All three are undone together by [`restore_terminal`],
//! and by the panic hook from [`install_panic_hook`].

use std::io::{self, Stdout, Write};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Failed to initialize the terminal.
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    /// Failed to restore the terminal.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Switches the terminal to raw mode, the alternate screen and mouse capture.
///
/// If a step fails, the steps already taken are undone before returning.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if any terminal operation fails.
///
/// # Examples
///
/// ```no_run
/// use tasklane_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal().expect("failed to set up terminal");
/// // Use terminal...
/// terminal::restore_terminal(&mut terminal).expect("failed to restore terminal");
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = leave(&mut stdout);
        return Err(TerminalError::Setup(err));
    }
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|err| {
        let _ = leave(&mut io::stdout());
        TerminalError::Setup(err)
    })
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any terminal operation fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    leave(terminal.backend_mut()).map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)
}

/// Installs a panic hook that restores the terminal, then runs the hook
/// that was installed before.
///
/// Call it once, before [`setup_terminal`], so a panic never leaves the
/// shell in raw mode with mouse reporting on.
///
/// # Examples
///
/// ```no_run
/// use tasklane_tui::terminal;
///
/// terminal::install_panic_hook();
/// let mut terminal = terminal::setup_terminal().expect("failed to set up terminal");
/// ```
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = leave(&mut io::stdout());
        original_hook(panic_info);
    }));
}

fn leave(out: &mut impl Write) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)?;
    raw
}
