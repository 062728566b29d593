// Allocator constants for the dumped runtime

/// Width of a pointer (`W`) on the dumping platform, in bytes
pub const POINTER_WIDTH: u64 = 8;

/// Pages are aligned to `1 << PAGE_ALIGN_LOG` bytes (16 KiB)
pub const PAGE_ALIGN_LOG: u32 = 14;

/// Largest accepted page alignment exponent (16 MiB pages)
///
/// Keeps a fully materialized page and its image column within memory and
/// `u32` pixel bounds.
pub const MAX_PAGE_ALIGN_LOG: u32 = 24;

/// Size of one object slot (`S`), in bytes
pub const SLOT_SIZE: u64 = 40;

/// The allocator reserves this many pointer-widths of each aligned region for
/// its own bookkeeping, so a page is `ALIGN - PADDING_WORDS * W` bytes long
pub const PADDING_WORDS: u64 = 5;

/// Number of pointer-widths taken by the page header before the first slot
pub const HEADER_WORDS: u64 = 1;

/// Dump records of this type are root references, not heap objects
pub const ROOT_KIND: &str = "ROOT";

/// Where the slot map is written when no path is given
pub const DEFAULT_OUTPUT: &str = "heap.png";
