#![allow(clippy::float_cmp)]

use super::*;

fn edge(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge {
    Edge { x1, y1, x2, y2 }
}

// =============================================================
// Edge / Segment
// =============================================================

#[test]
fn edge_between_points() {
    let e = Edge::between(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
    assert_eq!(e, edge(1.0, 2.0, 3.0, 4.0));
    assert_eq!(e.start(), Point::new(1.0, 2.0));
    assert_eq!(e.end(), Point::new(3.0, 4.0));
}

#[test]
fn empty_segment_has_no_vertices() {
    let seg = Segment::default();
    assert!(seg.is_empty());
    assert_eq!(seg.vertices().count(), 0);
}

#[test]
fn segment_vertices_are_start_plus_each_end() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 10.0, 0.0));
    store.push_edge(edge(10.0, 0.0, 10.0, 10.0));
    let Some(seg) = store.last() else {
        panic!("expected a segment");
    };
    let vertices: Vec<Point> = seg.vertices().collect();
    assert_eq!(
        vertices,
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
    );
}

// =============================================================
// SegmentStore
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = SegmentStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.edge_count(), 0);
    assert_eq!(store.revision(), 0);
}

#[test]
fn open_segment_appends_empty_segment() {
    let mut store = SegmentStore::new();
    store.open_segment();
    assert_eq!(store.len(), 1);
    assert!(store.last().is_some_and(Segment::is_empty));
}

#[test]
fn open_segment_prunes_previous_trailing_empty() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.open_segment();
    assert_eq!(store.len(), 1);
}

#[test]
fn open_segment_keeps_non_empty_segments() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 1.0, 1.0));
    store.open_segment();
    assert_eq!(store.len(), 2);
    assert_eq!(store.segments()[0].len(), 1);
}

#[test]
fn push_edge_goes_to_last_segment() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    store.open_segment();
    store.push_edge(edge(5.0, 5.0, 6.0, 5.0));
    store.push_edge(edge(6.0, 5.0, 7.0, 5.0));
    assert_eq!(store.segments()[0].len(), 1);
    assert_eq!(store.segments()[1].len(), 2);
    assert_eq!(store.edge_count(), 3);
}

#[test]
fn push_edge_on_empty_store_opens_segment() {
    let mut store = SegmentStore::new();
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    assert_eq!(store.len(), 1);
    assert_eq!(store.edge_count(), 1);
}

#[test]
fn pop_edge_returns_last_edge_and_keeps_segment() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    assert_eq!(store.pop_edge(), Some(edge(0.0, 0.0, 1.0, 0.0)));
    assert_eq!(store.len(), 1);
    assert!(store.last().is_some_and(Segment::is_empty));
}

#[test]
fn pop_edge_on_empty_segment_is_none() {
    let mut store = SegmentStore::new();
    assert_eq!(store.pop_edge(), None);
    store.open_segment();
    assert_eq!(store.pop_edge(), None);
}

#[test]
fn prune_trailing_empty_only_removes_empty_last() {
    let mut store = SegmentStore::new();
    assert!(!store.prune_trailing_empty());

    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    assert!(!store.prune_trailing_empty());
    assert_eq!(store.len(), 1);

    store.open_segment();
    assert!(store.prune_trailing_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_removes_everything() {
    let mut store = SegmentStore::new();
    store.open_segment();
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    store.open_segment();
    store.push_edge(edge(2.0, 0.0, 3.0, 0.0));
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn revision_bumps_on_each_edit() {
    let mut store = SegmentStore::new();
    store.open_segment();
    assert_eq!(store.revision(), 1);
    store.push_edge(edge(0.0, 0.0, 1.0, 0.0));
    assert_eq!(store.revision(), 2);
    store.pop_edge();
    assert_eq!(store.revision(), 3);
    store.prune_trailing_empty();
    assert_eq!(store.revision(), 4);
}

#[test]
fn revision_unchanged_by_no_op_edits() {
    let mut store = SegmentStore::new();
    store.pop_edge();
    store.prune_trailing_empty();
    store.clear();
    assert_eq!(store.revision(), 0);
}
