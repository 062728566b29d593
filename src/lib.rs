//! # Introduction
//!
//! pinmap rebuilds the page layout of a garbage-collected heap from a dump of
//! its live objects, then reports how many objects are pinned and draws a map
//! of every slot of every page.
//!
//! The dump never says where pages are. Pages are recovered from object
//! addresses alone, using the allocator's fixed constants: page alignment,
//! header size, padding reserve and slot size.
//!
//! ## Pipeline
//!
//! ```text
//! Dump → RecordStream → Heap → materialize → PixelGrid → PNG
//!                          ↘ Summary
//! ```
//!
//! 1. [`dump`]: decodes one JSON record per line, dropping root references.
//! 2. [`memory`]: page geometry, the reconstructed [`memory::Heap`] and
//!    slot materialization.
//! 3. [`render`]: orders pages by pinned count and maps slots to pixels.
//! 4. [`report`]: page, object and pinning statistics.
//! 5. [`analysis`]: runs the steps above over a file or reader.
//! 6. [`ui`]: ratatui-based page browser; not part of the stable library API.
//!
//! ## Default geometry
//!
//! 8-byte pointers, 16 KiB aligned pages, 40-byte slots, which gives 407 or
//! 408 slots per page depending on the page's alignment padding.

pub mod analysis;
pub mod dump;
pub mod errors;
pub mod memory;
pub mod render;
pub mod report;
pub mod ui;

pub use errors::{Error, ErrorKind, Result};
