// Integration tests for heap reconstruction and slot map rendering

use pinmap::analysis::{analyze, analyze_file};
use pinmap::memory::{materialize, Geometry, Heap, Record, Slot};
use pinmap::render::{PINNED, TRANSPARENT, UNPINNED};
use pinmap::{Error, ErrorKind};
use std::io::Write;

fn line(address: u64, kind: &str, pinned: Option<bool>) -> String {
    match pinned {
        Some(p) => format!(
            r#"{{"address":"0x{:x}", "type":"{}", "flags":{{"pinned":{}}}}}"#,
            address, kind, p
        ),
        None => format!(r#"{{"address":"0x{:x}", "type":"{}"}}"#, address, kind),
    }
}

/// Two pages: 0x4000 holds 3 objects (2 pinned), 0x8000 holds 1 unpinned
fn two_page_dump() -> String {
    [
        r#"{"type":"ROOT", "root":"vm", "references":["0x4010", "0x8020"]}"#.to_string(),
        line(0x4010, "STRING", Some(true)),
        line(0x4038, "OBJECT", Some(false)),
        line(0x8020, "ARRAY", None),
        line(0x4060, "STRING", Some(true)),
        r#"{"type":"ROOT", "root":"global_tbl", "references":[]}"#.to_string(),
    ]
    .join("\n")
}

#[test]
fn test_pinned_ratio_scenario() {
    let analysis = analyze(two_page_dump().as_bytes(), Geometry::default())
        .expect("Analysis failed");

    let summary = &analysis.summary;
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.objects, 4);
    assert_eq!(summary.pinned, 2);
    assert_eq!(summary.pinned_ratio, 0.5);

    let text = summary.to_string();
    assert!(text.contains("pages: 2"));
    assert!(text.contains("pinned objects: 2"));
    assert!(text.contains("pinned ratio: 0.5"));
    assert!(text.contains("total objects: 4"));
}

#[test]
fn test_grid_layout_for_two_pages() {
    let analysis = analyze(two_page_dump().as_bytes(), Geometry::default())
        .expect("Analysis failed");
    let grid = &analysis.grid;

    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 816);

    // Column pair 0/1 is the pinned page 0x4000: pinned, unpinned, pinned
    assert_eq!(grid.get(0, 0), Some(PINNED));
    assert_eq!(grid.get(1, 3), Some(UNPINNED));
    assert_eq!(grid.get(0, 4), Some(PINNED));
    assert_eq!(grid.get(0, 6), Some(TRANSPARENT));

    // Column pair 2/3 is 0x8000 with one unpinned object in slot 0
    assert_eq!(grid.get(2, 0), Some(UNPINNED));
    assert_eq!(grid.get(3, 2), Some(TRANSPARENT));

    // Rows past the smaller page's capacity stay transparent
    assert_eq!(grid.get(2, 815), Some(TRANSPARENT));
}

#[test]
fn test_materialized_pages_cover_full_capacity() {
    let analysis = analyze(two_page_dump().as_bytes(), Geometry::default())
        .expect("Analysis failed");

    for page in analysis.heap.pages() {
        let slots = materialize(page).expect("Materialization failed");
        assert_eq!(slots.len(), page.capacity());
        assert_eq!(
            slots.iter().filter(|s| s.is_occupied()).count(),
            page.occupied_count()
        );
        assert!((page.start() - page.base()) % 40 == 0);
    }
}

#[test]
fn test_skipped_slot_round_trip() {
    let geometry = Geometry::default();
    let start = geometry.compute(0x10_0000).start;
    let dump = [
        line(start, "OBJECT", Some(false)),
        line(start + 80, "OBJECT", Some(true)),
    ]
    .join("\n");

    let analysis = analyze(dump.as_bytes(), geometry).expect("Analysis failed");
    let page = analysis.heap.page(0x10_0000).expect("Page missing");
    let slots = materialize(page).expect("Materialization failed");

    assert!(slots[0].is_occupied());
    assert_eq!(slots[1], Slot::Empty(start + 40));
    assert!(slots[2].is_pinned());
}

#[test]
fn test_misaligned_object_aborts_analysis() {
    let geometry = Geometry::default();
    let start = geometry.compute(0x4000).start;
    let dump = [
        line(start, "OBJECT", None),
        line(start + geometry.slot_size() / 2, "OBJECT", None),
    ]
    .join("\n");

    let err = analyze(dump.as_bytes(), geometry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Consistency);
    assert!(matches!(err, Error::MisalignedObject { page: 0x4000, .. }));
}

#[test]
fn test_duplicate_object_aborts_analysis() {
    let dump = [
        line(0x4010, "OBJECT", None),
        line(0x4010, "STRING", Some(true)),
    ]
    .join("\n");

    let err = analyze(dump.as_bytes(), Geometry::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateAddress { address: 0x4010, .. }));
}

#[test]
fn test_malformed_line_aborts_analysis() {
    let dump = format!("{}\n{}\n", line(0x4010, "OBJECT", None), "{\"type\":");
    let err = analyze(dump.as_bytes(), Geometry::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().starts_with("line 2:"));
}

#[test]
fn test_custom_geometry() {
    // 4-byte pointers, 4 KiB pages, 16-byte slots
    let geometry = Geometry::new(4, 12, 16).expect("Geometry rejected");
    assert_eq!(geometry.page_bytes(), 4096 - 20);

    let layout = geometry.compute(0x1000);
    assert_eq!(layout.start, 0x1010);
    assert_eq!(layout.capacity, ((4076 - 16) / 16) as usize);

    assert_eq!(layout.capacity, 253);

    // last slot is 0x1010 + 252 * 16
    let mut heap = Heap::new(geometry);
    heap.ingest(Record::new(0x1010, true, "OBJECT")).unwrap();
    heap.ingest(Record::new(0x1fd0, false, "OBJECT")).unwrap();
    assert_eq!(heap.page_count(), 1);

    let slots = materialize(heap.page(0x1000).unwrap()).expect("Materialize failed");
    assert_eq!(slots.len(), 253);
    assert!(slots[0].is_pinned());
    assert_eq!(slots[252].record().map(|r| r.address), Some(0x1fd0));
    assert!(!slots[252].is_pinned());

    // one slot further lands in the page tail
    heap.ingest(Record::new(0x1fe0, false, "OBJECT")).unwrap();
    let err = materialize(heap.page(0x1000).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        Error::MisalignedObject {
            address: 0x1fe0,
            page: 0x1000
        }
    ));
}

#[test]
fn test_png_round_trip_through_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("heap.ndjson");
    let output = dir.path().join("heap.png");

    let mut file = std::fs::File::create(&input).expect("Failed to create dump");
    writeln!(file, "{}", two_page_dump()).expect("Failed to write dump");
    drop(file);

    let analysis = analyze_file(&input, Geometry::default()).expect("Analysis failed");
    analysis.grid.save_png(&output).expect("Failed to save image");

    let image = image::open(&output).expect("Failed to read image").to_rgba8();
    assert_eq!(image.dimensions(), (4, 816));
    assert_eq!(image.get_pixel(1, 1).0, PINNED);
    assert_eq!(image.get_pixel(3, 1).0, UNPINNED);
    assert_eq!(image.get_pixel(3, 5).0, TRANSPARENT);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = analyze_file(&dir.path().join("nope.ndjson"), Geometry::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
