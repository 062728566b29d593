//! Slot map rendering
//!
//! Every page becomes a 2-pixel-wide column and every slot a 2x2 block inside
//! it, so the image is `2 * pages` wide and `2 * max_capacity` tall:
//!
//! ```text
//!          page 0   page 1   page 2
//! slot 0   RR       GG       ..
//! slot 1   ..       RR       GG
//! slot 2   GG       ..       ..
//! ```
//!
//! Red is a pinned object, green an unpinned one, and empty slots (or rows past
//! a page's capacity) stay transparent. Columns are sorted so the most pinned
//! pages come first.

use crate::errors::{Error, Result};
use crate::memory::{materialize, Heap, Page, Slot};
use image::{ImageFormat, Rgba, RgbaImage};
use std::cmp::Reverse;
use std::path::Path;
use tracing::info;

/// An RGBA color
pub type Color = [u8; 4];

pub const TRANSPARENT: Color = [0, 0, 0, 0];
pub const PINNED: Color = [255, 0, 0, 255]; // Red
pub const UNPINNED: Color = [0, 255, 0, 255]; // Green

/// Side length of the square drawn for one slot
pub const CELL: u32 = 2;

/// Pages sorted by pinned object count, most pinned first
///
/// The sort is stable, so pages with equal counts stay in discovery order.
pub fn order_by_pinned(heap: &Heap) -> Vec<&Page> {
    let mut pages: Vec<&Page> = heap.pages().collect();
    pages.sort_by_key(|page| Reverse(page.pinned_count()));
    pages
}

/// A fixed-size grid of RGBA pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Create a grid filled with [`TRANSPARENT`]
    pub fn new(width: u32, height: u32) -> Self {
        PixelGrid {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Color at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Paint a `CELL x CELL` block with its top-left corner at `(x, y)`
    pub fn fill_cell(&mut self, x: u32, y: u32, color: Color) {
        for dy in 0..CELL {
            for dx in 0..CELL {
                let (px, py) = (x.saturating_add(dx), y.saturating_add(dy));
                if px < self.width && py < self.height {
                    let index = self.index(px, py);
                    self.pixels[index] = color;
                }
            }
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[self.index(x, y)])
        })
    }

    /// Encode the grid as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<()> {
        // Non-interlaced: the png encoder in `image` cannot write Adam7
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            })?;
        info!("wrote {}x{} slot map to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Color for a materialized slot
pub fn slot_color(slot: &Slot) -> Color {
    match slot.record() {
        Some(record) if record.pinned => PINNED,
        Some(_) => UNPINNED,
        None => TRANSPARENT,
    }
}

/// Pixel length of `cells` consecutive cells, if it fits in a `u32`
fn cell_span(cells: usize) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(CELL)
}

/// Draw already-materialized page columns into a grid
///
/// `rows` is the number of slot rows; slots past it are clipped. Fails with
/// [`Error::GridTooLarge`] if the grid cannot be addressed with `u32` pixel
/// coordinates.
pub fn draw_columns(columns: &[Vec<Slot>], rows: usize) -> Result<PixelGrid> {
    let too_large = || Error::GridTooLarge {
        columns: columns.len(),
        rows,
    };
    let width = cell_span(columns.len()).ok_or_else(too_large)?;
    let height = cell_span(rows).ok_or_else(too_large)?;
    if (width as usize).checked_mul(height as usize).is_none() {
        return Err(too_large());
    }

    let mut grid = PixelGrid::new(width, height);

    // Both spans fit in u32, so every cell origin below does too
    for (x, slots) in (0..width).step_by(CELL as usize).zip(columns) {
        for (y, slot) in (0..height).step_by(CELL as usize).zip(slots) {
            let color = slot_color(slot);
            if color != TRANSPARENT {
                grid.fill_cell(x, y, color);
            }
        }
    }

    Ok(grid)
}

/// Materialize every page and draw the slot map of the whole heap
///
/// Fails if any page does not materialize, so nothing is drawn from an
/// inconsistent dump.
pub fn render_heap(heap: &Heap) -> Result<PixelGrid> {
    let columns = order_by_pinned(heap)
        .into_iter()
        .map(materialize)
        .collect::<Result<Vec<_>>>()?;

    draw_columns(&columns, heap.geometry().max_capacity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Geometry, Record};

    fn heap_from(objects: &[(u64, bool)]) -> Heap {
        let mut heap = Heap::default();
        for &(addr, pinned) in objects {
            heap.ingest(Record::new(addr, pinned, "OBJECT")).unwrap();
        }
        heap
    }

    #[test]
    fn test_two_slot_page_pixels() {
        let columns = vec![vec![
            Slot::Occupied(Record::new(0x4010, true, "OBJECT")),
            Slot::Empty(0x4038),
        ]];
        let grid = draw_columns(&columns, 2).unwrap();

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(grid.get(x, y), Some(PINNED));
        }
        for (x, y) in [(0, 2), (1, 2), (0, 3), (1, 3)] {
            assert_eq!(grid.get(x, y), Some(TRANSPARENT));
        }
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_unpinned_is_green() {
        let columns = vec![
            vec![Slot::Empty(0x4010)],
            vec![Slot::Occupied(Record::new(0x8020, false, "STRING"))],
        ];
        let grid = draw_columns(&columns, 1).unwrap();
        assert_eq!(grid.get(0, 0), Some(TRANSPARENT));
        assert_eq!(grid.get(2, 0), Some(UNPINNED));
        assert_eq!(grid.get(3, 1), Some(UNPINNED));
    }

    #[test]
    fn test_pages_sorted_by_pinned_count() {
        // 0x4000 has one pinned object, 0x8000 has two, 0xc000 has one
        let heap = heap_from(&[
            (0x4010, true),
            (0x8020, true),
            (0x8048, true),
            (0xc008, true),
            (0xc030, false),
        ]);
        let bases: Vec<_> = order_by_pinned(&heap).iter().map(|p| p.base()).collect();
        assert_eq!(bases, vec![0x8000, 0x4000, 0xc000]);
    }

    #[test]
    fn test_render_heap_dimensions() {
        let heap = heap_from(&[(0x4010, true), (0x8020, false)]);
        let grid = render_heap(&heap).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2 * Geometry::default().max_capacity() as u32);
        // pinned page first
        assert_eq!(grid.get(0, 0), Some(PINNED));
        assert_eq!(grid.get(2, 0), Some(UNPINNED));
    }

    #[test]
    fn test_render_heap_rejects_misaligned_object() {
        let heap = heap_from(&[(0x4010 + 20, false)]);
        assert!(matches!(
            render_heap(&heap),
            Err(Error::MisalignedObject { .. })
        ));
    }

    #[test]
    fn test_rows_past_u32_pixels_are_rejected() {
        let columns = vec![vec![Slot::Empty(0x4010)]];
        let rows = u32::MAX as usize / 2 + 1;
        match draw_columns(&columns, rows) {
            Err(Error::GridTooLarge { columns, rows: r }) => {
                assert_eq!(columns, 1);
                assert_eq!(r, rows);
            }
            other => panic!("Expected grid too large error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_heap_renders_empty_grid() {
        let grid = render_heap(&Heap::default()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn test_to_image_matches_grid() {
        let columns = vec![vec![Slot::Occupied(Record::new(0x4010, false, "OBJECT"))]];
        let image = draw_columns(&columns, 1).unwrap().to_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 1).0, UNPINNED);
    }
}
