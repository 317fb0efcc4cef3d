//! Rendering: redraws the full scene onto a 2D drawing surface.
//!
//! [`Surface`] is the drawing capability the engine needs; the browser
//! [`CanvasRenderingContext2d`] implements it at the bottom of this module.
//! [`draw`] receives a read-only view of engine state and produces pixels. It
//! does not mutate any application state.
//!
//! Lines are stroked first and vertex markers are filled in a second pass, so
//! a later line never covers an earlier marker.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Extent, Point};
use crate::consts::{GRID_ALPHA, GRID_LINE_WIDTH, GRID_PIXEL_OFFSET};
use crate::engine::EngineCore;
use crate::segments::Segment;

/// Grid lines closer together than this many screen pixels are skipped.
const GRID_MIN_SPACING_PX: f64 = 2.0;

const GRID_STYLE: &str = "black";

/// A 2D drawing target.
///
/// Coordinates are transformed by the last [`Surface::set_view`] call.
pub trait Surface {
    type Error;

    /// Replace the transform with a uniform `scale` followed by a translation.
    fn set_view(&mut self, scale: f64, translate_x: f64, translate_y: f64) -> Result<(), Self::Error>;

    /// Erase the rectangle from the origin to `bounds`.
    fn clear_area(&mut self, bounds: Extent) -> Result<(), Self::Error>;

    fn set_stroke_paint(&mut self, style: &str, width: f64) -> Result<(), Self::Error>;

    fn set_fill_paint(&mut self, style: &str) -> Result<(), Self::Error>;

    fn set_opacity(&mut self, alpha: f64) -> Result<(), Self::Error>;

    fn start_path(&mut self) -> Result<(), Self::Error>;

    fn path_move_to(&mut self, p: Point) -> Result<(), Self::Error>;

    fn path_line_to(&mut self, p: Point) -> Result<(), Self::Error>;

    /// Stroke the current path.
    fn stroke_path(&mut self) -> Result<(), Self::Error>;

    /// Fill a circle as its own path.
    fn fill_circle(&mut self, center: Point, radius: f64) -> Result<(), Self::Error>;
}

/// Draw the full scene: grid, committed polylines, preview line, then markers.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw<S: Surface>(surface: &mut S, core: &EngineCore) -> Result<(), S::Error> {
    let camera = core.view_camera();
    let config = core.config();
    let viewport = core.viewport();
    let dpr = core.dpr();

    // Layer 1: clear in device space, then switch to world space.
    surface.set_view(dpr, 0.0, 0.0)?;
    surface.clear_area(viewport)?;
    surface.set_view(dpr * camera.zoom, dpr * camera.pan_x, dpr * camera.pan_y)?;

    // Layer 2: measurement grid.
    if config.show_grid {
        draw_grid(surface, &camera, viewport, config.canvas_extent(), config.distance_scale_factor)?;
    }

    // Layer 3: committed segments as one path.
    surface.set_opacity(1.0)?;
    surface.set_stroke_paint(&config.stroke_style, camera.screen_dist_to_world(config.stroke_width))?;
    surface.start_path()?;
    for segment in core.segments() {
        trace_polyline(surface, segment)?;
    }
    surface.stroke_path()?;

    // Layer 4: rubber-band line to the cursor.
    if let (Some(anchor), Some(cursor)) = (core.anchor(), core.preview_cursor()) {
        surface.start_path()?;
        surface.path_move_to(anchor)?;
        surface.path_line_to(cursor)?;
        surface.stroke_path()?;
    }

    // Layer 5: vertex markers.
    surface.set_fill_paint(&config.marker_style)?;
    for segment in core.segments() {
        for vertex in segment.vertices() {
            surface.fill_circle(vertex, config.marker_radius)?;
        }
    }
    let open_segment_is_empty = core.segments().last().is_some_and(Segment::is_empty);
    if let Some(anchor) = core.anchor().filter(|_| open_segment_is_empty) {
        surface.fill_circle(anchor, config.marker_radius)?;
    }

    Ok(())
}

fn trace_polyline<S: Surface>(surface: &mut S, segment: &Segment) -> Result<(), S::Error> {
    for (i, vertex) in segment.vertices().enumerate() {
        if i == 0 {
            surface.path_move_to(vertex)?;
        } else {
            surface.path_line_to(vertex)?;
        }
    }
    Ok(())
}

/// Lines every `step` world units over the visible part of the canvas.
fn draw_grid<S: Surface>(
    surface: &mut S,
    camera: &Camera,
    viewport: Extent,
    canvas: Extent,
    step: f64,
) -> Result<(), S::Error> {
    if step * camera.zoom < GRID_MIN_SPACING_PX {
        return Ok(());
    }
    let (top_left, bottom_right) = camera.visible_world(viewport);
    let x_min = top_left.x.max(0.0);
    let y_min = top_left.y.max(0.0);
    let x_max = bottom_right.x.min(canvas.width);
    let y_max = bottom_right.y.min(canvas.height);
    if x_max < x_min || y_max < y_min {
        return Ok(());
    }

    let half_px = camera.screen_dist_to_world(GRID_PIXEL_OFFSET);
    surface.set_stroke_paint(GRID_STYLE, camera.screen_dist_to_world(GRID_LINE_WIDTH))?;
    surface.set_opacity(GRID_ALPHA)?;
    surface.start_path()?;

    let mut x = (x_min / step).ceil() * step;
    while x <= x_max {
        surface.path_move_to(Point::new(x + half_px, y_min))?;
        surface.path_line_to(Point::new(x + half_px, y_max))?;
        x += step;
    }
    let mut y = (y_min / step).ceil() * step;
    while y <= y_max {
        surface.path_move_to(Point::new(x_min, y + half_px))?;
        surface.path_line_to(Point::new(x_max, y + half_px))?;
        y += step;
    }

    surface.stroke_path()?;
    surface.set_opacity(1.0)
}

// =============================================================
// Browser surface
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn set_view(&mut self, scale: f64, translate_x: f64, translate_y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_transform(self, scale, 0.0, 0.0, scale, translate_x, translate_y)
    }

    fn clear_area(&mut self, bounds: Extent) -> Result<(), JsValue> {
        CanvasRenderingContext2d::clear_rect(self, 0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    fn set_stroke_paint(&mut self, style: &str, width: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_stroke_style_str(self, style);
        CanvasRenderingContext2d::set_line_width(self, width);
        Ok(())
    }

    fn set_fill_paint(&mut self, style: &str) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_fill_style_str(self, style);
        Ok(())
    }

    fn set_opacity(&mut self, alpha: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
        Ok(())
    }

    fn start_path(&mut self) -> Result<(), JsValue> {
        CanvasRenderingContext2d::begin_path(self);
        Ok(())
    }

    fn path_move_to(&mut self, p: Point) -> Result<(), JsValue> {
        CanvasRenderingContext2d::move_to(self, p.x, p.y);
        Ok(())
    }

    fn path_line_to(&mut self, p: Point) -> Result<(), JsValue> {
        CanvasRenderingContext2d::line_to(self, p.x, p.y);
        Ok(())
    }

    fn stroke_path(&mut self) -> Result<(), JsValue> {
        CanvasRenderingContext2d::stroke(self);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::begin_path(self);
        CanvasRenderingContext2d::arc(self, center.x, center.y, radius, 0.0, 2.0 * PI)?;
        CanvasRenderingContext2d::fill(self);
        Ok(())
    }
}
