//! Heap model reconstructed from a dump
//!
//! This module provides the core memory abstractions:
//! - [`constants`]: Allocator constants of the dumping platform
//! - [`geometry`]: Page alignment, page size and per-page slot layout
//! - [`value`]: Dumped object records
//! - [`heap`]: Pages discovered from object addresses
//! - [`slot`]: Dense slot sequences reconciled against the page layout
//!
//! # Page Geometry
//!
//! With pointer width `W`, alignment exponent `L` and slot size `S`:
//! ```text
//! ALIGN      = 1 << L
//! MASK       = ALIGN - 1
//! PAGE_BYTES = ALIGN - 5 * W
//! base       = addr & !MASK
//! start      = round_up(base + W, S)
//! capacity   = (PAGE_BYTES - (start - base)) / S
//! ```

pub mod constants;
pub mod geometry;
pub mod heap;
pub mod slot;
pub mod value;

pub use geometry::{Geometry, PageLayout};
pub use heap::{Heap, Page};
pub use slot::{materialize, Slot};
pub use value::{Address, Record};
