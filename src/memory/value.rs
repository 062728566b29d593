//! Object values recovered from a heap dump
//!
//! A [`Record`] is one live object as the dump describes it. Only the fields
//! the page geometry cares about are kept: where the object lives, whether
//! the collector may move it, and its type tag (used for the per-type
//! breakdown in the summary).

/// Memory address type (64-bit)
pub type Address = u64;

/// One heap-resident object from the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub address: Address,
    pub pinned: bool,
    pub kind: String,
}

impl Record {
    pub fn new(address: Address, pinned: bool, kind: impl Into<String>) -> Self {
        Record {
            address,
            pinned,
            kind: kind.into(),
        }
    }
}
