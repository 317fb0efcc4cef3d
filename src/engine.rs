use tracing::{debug, error, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Extent, Point};
use crate::config::{ConfigError, EngineConfig};
use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_WHEEL_SENSITIVITY};
use crate::geometry::{angle_degrees, distance, format_heading};
use crate::input::{Button, InputState, Key, Modifiers, WheelDelta};
use crate::render;
use crate::segments::{Edge, Segment, SegmentStore};
use crate::throttle::Throttle;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notifications queued by the engine for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New heading readout text; empty when nothing is being drawn.
    HeadingChanged(String),
    /// New distance readouts in scaled units.
    DistanceChanged { segment_total: f64, edge_delta: f64 },
    /// The scene changed and should be redrawn.
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Operations queue [`Action`]s; the host drains them with [`EngineCore::take_actions`].
pub struct EngineCore {
    config: EngineConfig,
    segments: SegmentStore,
    camera: Camera,
    input: InputState,
    /// Scaled length of the segment being drawn.
    running_length: f64,
    preview_throttle: Throttle,
    viewport: Extent,
    dpr: f64,
    /// Space is held, so a primary drag pans instead of drawing.
    space_held: bool,
    actions: Vec<Action>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from host-supplied options.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first out-of-range option.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            preview_throttle: Throttle::from_rate_hz(config.refresh_rate_hz),
            config,
            segments: SegmentStore::new(),
            camera: Camera::default(),
            input: InputState::default(),
            running_length: 0.0,
            viewport: Extent::new(0.0, 0.0),
            dpr: 1.0,
            space_held: false,
            actions: Vec::new(),
        }
    }

    /// Replace the preview throttle, e.g. with [`Throttle::unlimited`] for
    /// non-interactive callers.
    pub fn set_preview_throttle(&mut self, throttle: Throttle) {
        self.preview_throttle = throttle;
    }

    // --- Drawing ---

    /// Start a segment at `screen_pt`, or extend the open one to it.
    pub fn begin_or_extend(&mut self, screen_pt: Point) {
        let world = self.camera.screen_to_world(screen_pt);
        match self.input {
            InputState::Panning { .. } => return,
            InputState::Idle => {
                self.segments.open_segment();
                self.running_length = 0.0;
                self.preview_throttle.reset();
                self.input = InputState::Drawing { anchor: world, cursor: None };
                debug!(x = world.x, y = world.y, segments = self.segments.len(), "segment opened");
            }
            InputState::Drawing { anchor, .. } => {
                let edge_delta = self.scaled_distance(anchor, world);
                self.segments.push_edge(Edge::between(anchor, world));
                self.running_length += edge_delta;
                self.input = InputState::Drawing { anchor: world, cursor: None };
                let angle = angle_degrees(anchor.x, anchor.y, world.x, world.y);
                self.report(angle, self.running_length, edge_delta);
                debug!(edge_delta, total = self.running_length, "edge committed");
            }
        }
        self.request_render();
    }

    /// Report the heading and distance of the line from the anchor to
    /// `screen_pt` without committing it.
    ///
    /// Returns `false` when not drawing or when throttled. `now_ms` is a
    /// monotonic timestamp in milliseconds.
    pub fn preview_move(&mut self, screen_pt: Point, now_ms: f64) -> bool {
        let InputState::Drawing { anchor, .. } = self.input else {
            return false;
        };
        if !self.preview_throttle.accept_at(now_ms) {
            return false;
        }
        let world = self.camera.screen_to_world(screen_pt);
        let edge_delta = self.scaled_distance(anchor, world);
        self.input = InputState::Drawing { anchor, cursor: Some(world) };
        let angle = angle_degrees(anchor.x, anchor.y, world.x, world.y);
        self.report(angle, self.running_length + edge_delta, edge_delta);
        self.request_render();
        trace!(x = world.x, y = world.y, edge_delta, "preview accepted");
        true
    }

    /// Finish the open segment, discarding it if it has no edges.
    ///
    /// Also prunes an empty trailing segment left by [`EngineCore::undo`].
    pub fn stop(&mut self) {
        let was_drawing = self.input.is_drawing();
        if was_drawing {
            self.input = InputState::Idle;
        }
        let pruned = self.segments.prune_trailing_empty();
        self.running_length = 0.0;
        self.clear_readouts();
        self.request_render();
        if was_drawing || pruned {
            debug!(was_drawing, pruned, segments = self.segments.len(), "drawing stopped");
        }
    }

    /// Stop drawing and remove the most recent edge.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.stop();
        if self.segments.is_empty() {
            debug!("undo with empty history");
            return false;
        }
        let removed = self.segments.pop_edge().is_some();
        self.request_render();
        debug!(removed, edges = self.segments.edge_count(), "undo");
        removed
    }

    /// Stop drawing and discard every segment.
    pub fn clear(&mut self) {
        self.stop();
        self.segments.clear();
        self.request_render();
        debug!("drawing cleared");
    }

    // --- Panning ---

    /// Start dragging the view from `screen_pt`. Any open segment is stopped.
    pub fn begin_pan(&mut self, screen_pt: Point) {
        if self.input.is_drawing() {
            self.stop();
        }
        self.input = InputState::Panning { anchor_screen: screen_pt, preview: None };
        debug!(x = screen_pt.x, y = screen_pt.y, "pan started");
    }

    /// Move the view by the drag so far.
    ///
    /// Without `commit`, the moved camera is only shown by the next redraw and
    /// the committed camera is untouched. With `commit`, the camera is updated
    /// and later deltas are measured from `screen_pt`.
    pub fn update_pan(&mut self, screen_pt: Point, commit: bool) {
        let InputState::Panning { anchor_screen, .. } = self.input else {
            return;
        };
        let moved = self
            .camera
            .panned_by(screen_pt.delta_from(anchor_screen))
            .clamped(self.viewport, self.config.canvas_extent());
        if commit {
            self.camera = moved;
            self.input = InputState::Panning { anchor_screen: screen_pt, preview: None };
        } else {
            self.input = InputState::Panning { anchor_screen, preview: Some(moved) };
        }
        self.request_render();
    }

    /// Commit the drag at `screen_pt` and return to idle.
    pub fn end_pan(&mut self, screen_pt: Point) {
        if !self.input.is_panning() {
            return;
        }
        self.update_pan(screen_pt, true);
        self.input = InputState::Idle;
        debug!(pan_x = self.camera.pan_x, pan_y = self.camera.pan_y, "pan committed");
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport = Extent::new(width_css.max(0.0), height_css.max(0.0));
        if dpr.is_finite() && dpr > 0.0 {
            self.dpr = dpr;
        }
        self.camera = self.camera.clamped(self.viewport, self.config.canvas_extent());
        self.request_render();
    }

    // --- Input events ---

    /// Middle-button drags, and primary drags while Space is held, pan the view.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) {
        let pans = match button {
            Button::Middle => true,
            Button::Primary => self.space_held,
            Button::Secondary => false,
        };
        if pans {
            self.begin_pan(screen_pt);
        }
    }

    /// A click on the canvas places a point.
    pub fn on_click(&mut self, screen_pt: Point) {
        if self.space_held || self.input.is_panning() {
            return;
        }
        self.begin_or_extend(screen_pt);
    }

    /// A click outside the canvas ends the current segment.
    pub fn on_background_click(&mut self) {
        self.stop();
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, now_ms: f64) {
        match self.input {
            InputState::Panning { .. } => self.update_pan(screen_pt, false),
            InputState::Drawing { .. } => {
                self.preview_move(screen_pt, now_ms);
            }
            InputState::Idle => {}
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button) {
        self.end_pan(screen_pt);
    }

    /// The cursor left the canvas: blank the readouts.
    pub fn on_pointer_leave(&mut self) {
        self.clear_readouts();
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) {
        if key.is_space() {
            self.space_held = true;
        } else if modifiers.command() && key.is_undo_letter() {
            self.undo();
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        if key.is_escape() {
            self.stop();
        } else if key.is_space() {
            self.space_held = false;
        }
    }

    /// Zoom about the cursor.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) {
        if self.input.is_panning() {
            return;
        }
        let factor = (-delta.dy * ZOOM_WHEEL_SENSITIVITY).exp();
        let zoom = (self.camera.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        self.camera = self
            .camera
            .zoomed_at(screen_pt, zoom)
            .clamped(self.viewport, self.config.canvas_extent());
        self.request_render();
    }

    // --- Queries ---

    /// Drain the queued actions.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Segments in drawing order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        self.segments.segments()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Revision counter of the segment model.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.segments.revision()
    }

    /// Scaled length of the segment being drawn.
    #[must_use]
    pub fn running_length(&self) -> f64 {
        self.running_length
    }

    /// Scaled length of every committed edge.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.segments
            .segments()
            .iter()
            .flat_map(Segment::edges)
            .map(|e| distance(e.x1, e.y1, e.x2, e.y2, self.config.distance_scale_factor))
            .sum()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.input.is_panning()
    }

    /// World-space point the next edge starts from, while drawing.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self.input {
            InputState::Drawing { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    /// World-space cursor of the last accepted preview, while drawing.
    #[must_use]
    pub fn preview_cursor(&self) -> Option<Point> {
        match self.input {
            InputState::Drawing { cursor, .. } => cursor,
            _ => None,
        }
    }

    /// The committed camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The camera to draw with: the uncommitted drag preview while panning.
    #[must_use]
    pub fn view_camera(&self) -> Camera {
        match self.input {
            InputState::Panning { preview: Some(preview), .. } => preview,
            _ => self.camera,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    #[must_use]
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    // --- Helpers ---

    fn scaled_distance(&self, from: Point, to: Point) -> f64 {
        distance(from.x, from.y, to.x, to.y, self.config.distance_scale_factor)
    }

    fn report(&mut self, angle: u16, segment_total: f64, edge_delta: f64) {
        let heading = match format_heading(angle) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, angle, "heading outside compass range");
                format!("{angle}°")
            }
        };
        self.actions.push(Action::HeadingChanged(heading));
        self.actions.push(Action::DistanceChanged { segment_total, edge_delta });
    }

    fn clear_readouts(&mut self) {
        self.actions.push(Action::HeadingChanged(String::new()));
        self.actions.push(Action::DistanceChanged { segment_total: 0.0, edge_delta: 0.0 });
    }

    fn request_render(&mut self) {
        if !self.actions.contains(&Action::RenderNeeded) {
            self.actions.push(Action::RenderNeeded);
        }
    }
}

/// The full canvas engine. Wraps `EngineCore`, draws to the browser canvas,
/// and forwards readouts to the host's callbacks.
pub struct Engine {
    ctx: CanvasRenderingContext2d,
    on_heading: Option<js_sys::Function>,
    on_distance: Option<js_sys::Function>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Fails when the canvas has no 2D context or the config is invalid.
    pub fn new(canvas: &HtmlCanvasElement, config: EngineConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let core = EngineCore::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { ctx, on_heading: None, on_distance: None, core })
    }

    /// Register `onHeadingChanged(text)`.
    pub fn set_heading_listener(&mut self, callback: js_sys::Function) {
        self.on_heading = Some(callback);
    }

    /// Register `onDistanceChanged(segmentTotal, edgeDelta)`.
    pub fn set_distance_listener(&mut self, callback: js_sys::Function) {
        self.on_distance = Some(callback);
    }

    // --- Delegated operations ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.flush();
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.flush();
    }

    pub fn undo(&mut self) -> bool {
        let removed = self.core.undo();
        self.flush();
        removed
    }

    pub fn stop(&mut self) {
        self.core.stop();
        self.flush();
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) {
        self.core.on_pointer_down(screen_pt, button, modifiers);
        self.flush();
    }

    pub fn on_click(&mut self, screen_pt: Point) {
        self.core.on_click(screen_pt);
        self.flush();
    }

    pub fn on_background_click(&mut self) {
        self.core.on_background_click();
        self.flush();
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) {
        self.core.on_pointer_move(screen_pt, now_ms());
        self.flush();
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) {
        self.core.on_pointer_up(screen_pt, button);
        self.flush();
    }

    pub fn on_pointer_leave(&mut self) {
        self.core.on_pointer_leave();
        self.flush();
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) {
        self.core.on_wheel(screen_pt, delta);
        self.flush();
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) {
        self.core.on_key_down(key, modifiers);
        self.flush();
    }

    pub fn on_key_up(&mut self, key: Key) {
        self.core.on_key_up(key);
        self.flush();
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    pub fn render(&mut self) {
        if let Err(e) = render::draw(&mut self.ctx, &self.core) {
            error!(error = ?e, "render failed");
        }
    }

    fn flush(&mut self) {
        for action in self.core.take_actions() {
            match action {
                Action::HeadingChanged(text) => {
                    if let Some(callback) = &self.on_heading {
                        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&text)) {
                            error!(error = ?e, "heading listener failed");
                        }
                    }
                }
                Action::DistanceChanged { segment_total, edge_delta } => {
                    if let Some(callback) = &self.on_distance {
                        let result = callback.call2(
                            &JsValue::NULL,
                            &JsValue::from_f64(segment_total),
                            &JsValue::from_f64(edge_delta),
                        );
                        if let Err(e) = result {
                            error!(error = ?e, "distance listener failed");
                        }
                    }
                }
                Action::RenderNeeded => self.render(),
            }
        }
    }
}

/// Milliseconds from the page's monotonic clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}
