#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Width and height of a rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Camera state for pan/zoom over the bounded virtual canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels: the screen position of the world origin.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// World-space point shown at the top-left corner of the viewport.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.screen_to_world(Point::new(0.0, 0.0))
    }

    /// Translate the view by a screen-space delta.
    #[must_use]
    pub fn panned_by(self, delta: Point) -> Self {
        Self { pan_x: self.pan_x + delta.x, pan_y: self.pan_y + delta.y, ..self }
    }

    /// Change zoom while keeping the world point under `screen` fixed.
    #[must_use]
    pub fn zoomed_at(self, screen: Point, zoom: f64) -> Self {
        let anchor = self.screen_to_world(screen);
        Self {
            pan_x: screen.x - anchor.x * zoom,
            pan_y: screen.y - anchor.y * zoom,
            zoom,
        }
    }

    /// Restrict the pan so the viewport stays over the canvas.
    ///
    /// When the scaled canvas is smaller than the viewport on an axis, the
    /// canvas may move anywhere inside the viewport on that axis instead.
    #[must_use]
    pub fn clamped(self, viewport: Extent, canvas: Extent) -> Self {
        Self {
            pan_x: clamp_axis(self.pan_x, viewport.width, canvas.width * self.zoom),
            pan_y: clamp_axis(self.pan_y, viewport.height, canvas.height * self.zoom),
            ..self
        }
    }

    /// World-space rectangle `(top_left, bottom_right)` covered by the viewport.
    #[must_use]
    pub fn visible_world(&self, viewport: Extent) -> (Point, Point) {
        let top_left = self.screen_to_world(Point::new(0.0, 0.0));
        let bottom_right = self.screen_to_world(Point::new(viewport.width, viewport.height));
        (top_left, bottom_right)
    }
}

fn clamp_axis(pan: f64, viewport: f64, content: f64) -> f64 {
    let slack = viewport - content;
    pan.clamp(slack.min(0.0), slack.max(0.0))
}
