//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`pages`]: Page list ordered like the slot map, with occupancy bars
//! - [`slots`]: Slot grid of the selected page
//! - [`status`]: Status bar with heap totals and key bindings
//! - `utils`: Border styling, address formatting and scroll helpers
//!
//! Each pane module exports a stateless `render_*` function that takes the
//! frame, its area and the data it draws, plus its scroll offset when it
//! scrolls.

mod utils;

pub mod pages;
pub mod slots;
pub mod status;

pub use pages::render_pages_pane;
pub use slots::render_slots_pane;
pub use status::render_status_bar;
