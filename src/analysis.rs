//! End-to-end analysis of a dump: decode, rebuild, materialize, summarize

use crate::dump::RecordStream;
use crate::errors::{Error, Result};
use crate::memory::{Geometry, Heap};
use crate::render::{render_heap, PixelGrid};
use crate::report::Summary;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Everything derived from one dump
#[derive(Debug, Clone)]
pub struct Analysis {
    pub heap: Heap,
    pub summary: Summary,
    pub grid: PixelGrid,
}

/// Analyze a dump read from `reader`
///
/// Any decode or consistency error aborts the whole analysis.
pub fn analyze<R: BufRead>(reader: R, geometry: Geometry) -> Result<Analysis> {
    let mut stream = RecordStream::new(reader, geometry);
    let heap = Heap::build(geometry, stream.by_ref())?;
    info!(
        "read {} lines, skipped {} root references, found {} objects in {} pages",
        stream.lines_read(),
        stream.roots_skipped(),
        heap.occupied_count(),
        heap.page_count()
    );

    let grid = render_heap(&heap)?;
    let summary = Summary::from_heap(&heap);

    Ok(Analysis {
        heap,
        summary,
        grid,
    })
}

/// Analyze the dump at `path`
pub fn analyze_file(path: &Path, geometry: Geometry) -> Result<Analysis> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("analyzing {}", path.display());
    analyze(BufReader::new(file), geometry)
}
