//! Occupancy and pinning statistics

use crate::memory::Heap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Object counts for one `"type"` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: String,
    pub objects: usize,
    pub pinned: usize,
}

/// Statistics of a reconstructed heap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub pages: usize,
    pub pinned: usize,
    pub pinned_ratio: f64,
    pub objects: usize,
    /// Slots no object occupies, over every page
    pub free_slots: usize,
    pub kinds: Vec<KindCount>,
}

impl Summary {
    pub fn from_heap(heap: &Heap) -> Self {
        let objects = heap.occupied_count();
        let pinned = heap.pinned_count();
        let pinned_ratio = if objects == 0 {
            0.0
        } else {
            pinned as f64 / objects as f64
        };

        let mut by_kind: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        for record in heap.pages().flat_map(|page| page.objects()) {
            let entry = by_kind.entry(record.kind.as_str()).or_default();
            entry.0 += 1;
            if record.pinned {
                entry.1 += 1;
            }
        }

        let mut kinds: Vec<KindCount> = by_kind
            .into_iter()
            .map(|(kind, (objects, pinned))| KindCount {
                kind: kind.to_string(),
                objects,
                pinned,
            })
            .collect();
        kinds.sort_by(|a, b| b.objects.cmp(&a.objects).then_with(|| a.kind.cmp(&b.kind)));

        Summary {
            pages: heap.page_count(),
            pinned,
            pinned_ratio,
            objects,
            free_slots: heap.total_capacity().saturating_sub(objects),
            kinds,
        }
    }

    /// Per-type breakdown, one line per kind
    pub fn kind_table(&self) -> String {
        let width = self.kinds.iter().map(|k| k.kind.len()).max().unwrap_or(0);
        let mut out = String::new();
        for k in &self.kinds {
            out.push_str(&format!(
                "  {:<width$}  {:>8} objects  {:>8} pinned\n",
                k.kind,
                k.objects,
                k.pinned,
                width = width
            ));
        }
        out
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pages: {}", self.pages)?;
        writeln!(f, "pinned objects: {}", self.pinned)?;
        writeln!(f, "pinned ratio: {:?}", self.pinned_ratio)?;
        write!(f, "total objects: {}", self.objects)
    }
}
