//! Slot materialization
//!
//! A [`Page`] only knows which addresses hold objects. [`materialize`] turns that
//! sparse map into the dense slot sequence the allocator actually laid out,
//! synthesizing an [`Slot::Empty`] for every expected address with no object.
//!
//! The walk is a merge of two sorted sequences: the occupied addresses and the
//! expected addresses `start, start + S, ...`. Any object left over once every
//! expected address has been visited sits between slots (or past the end of
//! the page), which means the dump and the geometry disagree.

use super::heap::Page;
use super::value::{Address, Record};
use crate::errors::{Error, Result};

/// One slot of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Occupied(Record),
    Empty(Address),
}

impl Slot {
    pub fn address(&self) -> Address {
        match self {
            Slot::Occupied(record) => record.address,
            Slot::Empty(addr) => *addr,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Slot::Occupied(record) if record.pinned)
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(record) => Some(record),
            Slot::Empty(_) => None,
        }
    }
}

/// Lay out every slot of `page` in address order
///
/// Always returns exactly `page.capacity()` slots. Fails with
/// [`Error::MisalignedObject`] if an object does not sit on a slot boundary
/// inside the page.
pub fn materialize(page: &Page) -> Result<Vec<Slot>> {
    let mut occupied: Vec<&Record> = page.objects().collect();
    occupied.sort_unstable_by_key(|r| r.address);

    let mut pending = occupied.into_iter().peekable();
    let mut slots = Vec::with_capacity(page.capacity());

    for index in 0..page.capacity() {
        let expected = page.slot_address(index);
        match pending.next_if(|r| r.address == expected) {
            Some(record) => slots.push(Slot::Occupied(record.clone())),
            None => slots.push(Slot::Empty(expected)),
        }
    }

    if let Some(leftover) = pending.next() {
        return Err(Error::MisalignedObject {
            address: leftover.address,
            page: page.base(),
        });
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::geometry::Geometry;

    fn page_with(geometry: &Geometry, base: Address, objects: &[(Address, bool)]) -> Page {
        let mut page = Page::new(base, geometry);
        for &(addr, pinned) in objects {
            page.insert(Record::new(addr, pinned, "OBJECT")).unwrap();
        }
        page
    }

    #[test]
    fn test_empty_page_is_all_empty_slots() {
        let g = Geometry::default();
        let page = page_with(&g, 0x4000, &[]);
        let slots = materialize(&page).unwrap();

        assert_eq!(slots.len(), page.capacity());
        assert!(slots.iter().all(|s| !s.is_occupied()));
        assert_eq!(slots[0].address(), page.start());
        assert_eq!(
            slots.last().unwrap().address(),
            page.start() + (page.capacity() as u64 - 1) * 40
        );
    }

    #[test]
    fn test_gap_produces_empty_slot() {
        let g = Geometry::default();
        let start = g.compute(0x4000).start;
        let page = page_with(&g, 0x4000, &[(start, true), (start + 80, false)]);
        let slots = materialize(&page).unwrap();

        assert!(slots[0].is_occupied());
        assert!(slots[0].is_pinned());
        assert_eq!(slots[1], Slot::Empty(start + 40));
        assert!(slots[2].is_occupied());
        assert!(!slots[2].is_pinned());
        assert!(!slots[3].is_occupied());
    }

    #[test]
    fn test_materialize_preserves_length_and_count() {
        let g = Geometry::default();
        let start = g.compute(0x8000).start;
        let objects: Vec<_> = (0..50u64).map(|i| (start + i * 7 * 40, i % 2 == 0)).collect();
        let page = page_with(&g, 0x8000, &objects);
        let slots = materialize(&page).unwrap();

        assert_eq!(slots.len(), page.capacity());
        assert_eq!(slots.iter().filter(|s| s.is_occupied()).count(), 50);
        assert_eq!(slots.iter().filter(|s| s.is_pinned()).count(), 25);

        for pair in slots.windows(2) {
            assert_eq!(pair[1].address() - pair[0].address(), 40);
        }
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let g = Geometry::default();
        let start = g.compute(0x4000).start;
        let page = page_with(&g, 0x4000, &[(start + 40, false), (start + 400, true)]);
        assert_eq!(materialize(&page).unwrap(), materialize(&page).unwrap());
    }

    #[test]
    fn test_misaligned_object_is_fatal() {
        let g = Geometry::default();
        let start = g.compute(0x4000).start;
        let page = page_with(&g, 0x4000, &[(start, false), (start + 20, false)]);

        match materialize(&page) {
            Err(Error::MisalignedObject { address, page }) => {
                assert_eq!(address, start + 20);
                assert_eq!(page, 0x4000);
            }
            other => panic!("Expected misaligned object error, got {:?}", other),
        }
    }

    #[test]
    fn test_object_in_header_is_fatal() {
        let g = Geometry::default();
        let page = page_with(&g, 0x4000, &[(0x4000, false)]);
        assert!(matches!(
            materialize(&page),
            Err(Error::MisalignedObject { address: 0x4000, .. })
        ));
    }

    #[test]
    fn test_object_past_last_slot_is_fatal() {
        let g = Geometry::default();
        let layout = g.compute(0x4000);
        let past_end = layout.start + layout.capacity as u64 * 40;
        assert!(past_end < 0x8000);

        let page = page_with(&g, 0x4000, &[(past_end, true)]);
        assert!(materialize(&page).is_err());
    }
}
