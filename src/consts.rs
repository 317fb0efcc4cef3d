//! Shared numeric constants for the crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest zoom factor the wheel can reach.
pub const ZOOM_MIN: f64 = 0.25;

/// Largest zoom factor the wheel can reach.
pub const ZOOM_MAX: f64 = 8.0;

/// Zoom multiplier per pixel of wheel delta.
pub const ZOOM_WHEEL_SENSITIVITY: f64 = 0.0015;

// ── Defaults ────────────────────────────────────────────────────

/// Pixels per reported distance unit.
pub const DEFAULT_DISTANCE_SCALE_FACTOR: f64 = 7.0;

/// Cursor preview refreshes per second.
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 10.0;

/// Committed line width in CSS pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Vertex marker radius in world units.
pub const DEFAULT_MARKER_RADIUS: f64 = 2.0;

/// Virtual canvas width in world units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 4000.0;

/// Virtual canvas height in world units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 4000.0;

// ── Grid ────────────────────────────────────────────────────────

/// Grid line opacity.
pub const GRID_ALPHA: f64 = 0.1;

/// Grid line width in CSS pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Half-pixel offset so 1px grid lines land on pixel centers.
pub const GRID_PIXEL_OFFSET: f64 = 0.5;
