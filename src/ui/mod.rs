//! Terminal page browser built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (pages,
//!   slots, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`browse`], which takes over the terminal until the user
//! quits.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

use crate::memory::Heap;
use crate::report::Summary;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Browse a reconstructed heap interactively
///
/// The terminal is restored before returning, whether or not the event loop
/// failed.
pub fn browse(heap: &Heap, summary: Summary) -> anyhow::Result<()> {
    let mut app = App::new(heap, summary)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
