//! Segment model: the edges the user has committed and the store that owns them.
//!
//! An [`Edge`] is one straight line between two consecutive clicks. A
//! [`Segment`] is the polyline drawn between a start click and a stop. The
//! [`SegmentStore`] keeps segments in drawing order and only changes through
//! the structural edits below, each of which bumps [`SegmentStore::revision`].
//!
//! The store holds at most one empty segment, and only in last position. It
//! exists between the click that starts a segment and the first edge, or after
//! an undo removed a segment's last edge. [`SegmentStore::prune_trailing_empty`]
//! removes it.

#[cfg(test)]
#[path = "segments_test.rs"]
mod segments_test;

use crate::camera::Point;

/// One drawn line between two consecutive clicks, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Edge {
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        Self { x1: from.x, y1: from.y, x2: to.x, y2: to.y }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// A continuous polyline: edges in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    edges: Vec<Edge>,
}

impl Segment {
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Every vertex of the polyline: the first edge's start, then each edge's end.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.edges
            .first()
            .map(Edge::start)
            .into_iter()
            .chain(self.edges.iter().map(Edge::end))
    }
}

/// Owns all segments in drawing order.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    revision: u64,
}

impl SegmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments in drawing order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The most recently opened segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Total edge count across all segments.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Counter bumped by every structural edit.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open a new, empty segment at the end.
    ///
    /// A trailing empty segment is pruned first so empties never pile up.
    pub fn open_segment(&mut self) {
        self.prune_trailing_empty();
        self.segments.push(Segment::default());
        self.bump();
    }

    /// Append an edge to the last segment, opening one if the store is empty.
    pub fn push_edge(&mut self, edge: Edge) {
        if self.segments.is_empty() {
            self.segments.push(Segment::default());
        }
        if let Some(segment) = self.segments.last_mut() {
            segment.edges.push(edge);
        }
        self.bump();
    }

    /// Remove and return the last edge of the last segment.
    ///
    /// The segment itself stays even when this empties it.
    pub fn pop_edge(&mut self) -> Option<Edge> {
        let edge = self.segments.last_mut()?.edges.pop()?;
        self.bump();
        Some(edge)
    }

    /// Drop the last segment if it has no edges. Returns whether one was dropped.
    pub fn prune_trailing_empty(&mut self) -> bool {
        if self.segments.last().is_some_and(Segment::is_empty) {
            self.segments.pop();
            self.bump();
            return true;
        }
        false
    }

    /// Remove every segment.
    pub fn clear(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        self.segments.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
