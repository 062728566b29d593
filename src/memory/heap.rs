//! Heap reconstruction from dumped object addresses
//!
//! This module rebuilds the allocator's page table from nothing but object
//! addresses:
//! - [`Page`]: one aligned page, its slot layout and the objects found in it
//! - [`Heap`]: every page seen so far, keyed by base address
//!
//! Pages are created the first time an address inside them shows up and are
//! never removed. Discovery order is remembered so iteration is stable.

use super::geometry::Geometry;
use super::value::{Address, Record};
use crate::errors::{Error, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

/// One page of the heap
#[derive(Debug, Clone)]
pub struct Page {
    base: Address,
    start: Address,
    capacity: usize,
    slot_size: u64,
    objects: FxHashMap<Address, Record>,
}

impl Page {
    /// Create an empty page at `base`, laid out by `geometry`
    pub fn new(base: Address, geometry: &Geometry) -> Self {
        let layout = geometry.compute(base);
        Page {
            base,
            start: layout.start,
            capacity: layout.capacity,
            slot_size: geometry.slot_size(),
            objects: FxHashMap::default(),
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    /// Address of the first slot
    pub fn start(&self) -> Address {
        self.start
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slot_size(&self) -> u64 {
        self.slot_size
    }

    /// Address of slot `index`
    pub fn slot_address(&self, index: usize) -> Address {
        self.start + index as u64 * self.slot_size
    }

    /// Add an object to this page
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.objects.contains_key(&record.address) {
            return Err(Error::DuplicateAddress {
                address: record.address,
                page: self.base,
            });
        }
        self.objects.insert(record.address, record);
        Ok(())
    }

    /// Occupied objects, in no particular order
    pub fn objects(&self) -> impl Iterator<Item = &Record> {
        self.objects.values()
    }

    pub fn get(&self, addr: Address) -> Option<&Record> {
        self.objects.get(&addr)
    }

    pub fn occupied_count(&self) -> usize {
        self.objects.len()
    }

    pub fn pinned_count(&self) -> usize {
        self.objects.values().filter(|r| r.pinned).count()
    }

    /// Slots with no object in them
    pub fn free_count(&self) -> usize {
        self.capacity.saturating_sub(self.objects.len())
    }
}

/// The reconstructed heap
#[derive(Debug, Clone)]
pub struct Heap {
    geometry: Geometry,
    pages: FxHashMap<Address, Page>,
    order: Vec<Address>, // Base addresses in discovery order
}

impl Heap {
    pub fn new(geometry: Geometry) -> Self {
        Heap {
            geometry,
            pages: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Build a heap from a record stream, stopping at the first error
    pub fn build<I>(geometry: Geometry, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut heap = Heap::new(geometry);
        for record in records {
            heap.ingest(record?)?;
        }
        Ok(heap)
    }

    /// Place a record in its page, creating the page on first use
    pub fn ingest(&mut self, record: Record) -> Result<()> {
        let base = self.geometry.page_base(record.address);
        let geometry = &self.geometry;
        let order = &mut self.order;

        let page = self.pages.entry(base).or_insert_with(|| {
            let page = Page::new(base, geometry);
            debug!(
                "discovered page 0x{:x}: first slot 0x{:x}, {} slots",
                base,
                page.start(),
                page.capacity()
            );
            order.push(base);
            page
        });

        page.insert(record)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get the page with the given base address
    pub fn page(&self, base: Address) -> Option<&Page> {
        self.pages.get(&base)
    }

    /// Get the page an address falls in, if any object has been seen there
    pub fn page_containing(&self, addr: Address) -> Option<&Page> {
        self.page(self.geometry.page_base(addr))
    }

    /// Pages in the order they were first seen
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.order.iter().filter_map(|base| self.pages.get(base))
    }

    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.pages.values().map(Page::occupied_count).sum()
    }

    pub fn pinned_count(&self) -> usize {
        self.pages.values().map(Page::pinned_count).sum()
    }

    /// Total slot capacity over every page
    pub fn total_capacity(&self) -> usize {
        self.pages.values().map(Page::capacity).sum()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}
