//! Page geometry derived from fixed allocator constants
//!
//! Nothing here looks at the dump. Given the pointer width `W`, the page
//! alignment exponent `L` and the slot size `S`, every page of the heap has
//! the same shape:
//!
//! ```text
//! base                     start                                   base + PAGE_BYTES
//! | header (W) | padding   | slot 0 | slot 1 | ... | slot cap-1 | tail |
//! ```
//!
//! `start` is the first multiple of `S` at or after `base + W`, so the amount of
//! padding (and therefore the capacity) differs from page to page depending on
//! where the page lands relative to `S`.

use super::constants::{
    HEADER_WORDS, MAX_PAGE_ALIGN_LOG, PADDING_WORDS, PAGE_ALIGN_LOG, POINTER_WIDTH, SLOT_SIZE,
};
use super::value::Address;
use crate::errors::{Error, Result};

/// Where a page's slots begin and how many fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub start: Address,
    pub capacity: usize,
}

/// Allocator geometry for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pointer_width: u64,
    align_log: u32,
    slot_size: u64,
}

impl Geometry {
    /// Create a geometry, rejecting constants that cannot describe a page
    pub fn new(pointer_width: u64, align_log: u32, slot_size: u64) -> Result<Self> {
        if pointer_width == 0 {
            return Err(Error::InvalidGeometry("pointer width is zero".into()));
        }
        if slot_size == 0 {
            return Err(Error::InvalidGeometry("slot size is zero".into()));
        }
        if align_log > MAX_PAGE_ALIGN_LOG {
            return Err(Error::InvalidGeometry(format!(
                "page alignment 2^{} exceeds the 2^{} limit",
                align_log, MAX_PAGE_ALIGN_LOG
            )));
        }

        let geometry = Geometry {
            pointer_width,
            align_log,
            slot_size,
        };

        let reserved = pointer_width
            .checked_mul(PADDING_WORDS + HEADER_WORDS)
            .ok_or_else(|| Error::InvalidGeometry("pointer width too large".into()))?;
        if geometry.align() <= reserved {
            return Err(Error::InvalidGeometry(format!(
                "a {}-byte page cannot hold its {}-byte header and padding",
                geometry.align(),
                reserved
            )));
        }
        if geometry.max_capacity() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "a {}-byte slot does not fit in a {}-byte page",
                slot_size,
                geometry.page_bytes()
            )));
        }

        Ok(geometry)
    }

    pub fn pointer_width(&self) -> u64 {
        self.pointer_width
    }

    pub fn align_log(&self) -> u32 {
        self.align_log
    }

    pub fn slot_size(&self) -> u64 {
        self.slot_size
    }

    /// `ALIGN = 1 << L`
    pub fn align(&self) -> u64 {
        1u64 << self.align_log
    }

    /// `MASK = ALIGN - 1`
    pub fn mask(&self) -> u64 {
        self.align() - 1
    }

    /// Usable bytes per page: `ALIGN - 5 * W`
    pub fn page_bytes(&self) -> u64 {
        self.align() - PADDING_WORDS * self.pointer_width
    }

    /// Bytes taken by the page header
    pub fn header(&self) -> u64 {
        HEADER_WORDS * self.pointer_width
    }

    /// Base address of the page containing `addr`
    pub fn page_base(&self, addr: Address) -> Address {
        addr & !self.mask()
    }

    /// Recover an address from a tagged object id
    pub fn id_to_address(&self, object_id: u64) -> Address {
        object_id << 1
    }

    /// Compute where the slots of the page at `base` start and how many fit
    pub fn compute(&self, base: Address) -> PageLayout {
        let mut start = base + self.header();
        let rem = start % self.slot_size;
        if rem != 0 {
            start += self.slot_size - rem;
        }

        let used = start - base;
        let capacity = (self.page_bytes().saturating_sub(used) / self.slot_size) as usize;

        PageLayout { start, capacity }
    }

    /// Largest capacity any page can have, reached when no alignment padding
    /// follows the header
    pub fn max_capacity(&self) -> usize {
        (self.page_bytes().saturating_sub(self.header()) / self.slot_size) as usize
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            pointer_width: POINTER_WIDTH,
            align_log: PAGE_ALIGN_LOG,
            slot_size: SLOT_SIZE,
        }
    }
}
