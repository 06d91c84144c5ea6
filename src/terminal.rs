//! Terminal setup and teardown.
//!
//! Low-level functions for entering and leaving TUI mode, plus a panic hook
//! that puts the terminal back before the panic message is printed.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{Result, ResultExt};

/// Terminal type used by the application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen and create a terminal.
///
/// # Errors
///
/// Returns an error if any terminal commands fail.
pub fn init() -> Result<Tui> {
    enable_raw_mode().terminal_context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        leave_tui_mode(&mut stdout);
        return Err(e).terminal_context("entering alternate screen");
    }
    Terminal::new(CrosstermBackend::new(stdout)).terminal_context("creating terminal")
}

/// Restore the terminal to its normal state.
pub fn restore() {
    leave_tui_mode(&mut io::stdout());
}

/// Leave TUI mode.
///
/// Safe to call multiple times; errors are ignored.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    // Disable raw mode first to allow normal terminal operation
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Install a panic hook that restores the terminal.
///
/// This should be called before [`init`].
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}
