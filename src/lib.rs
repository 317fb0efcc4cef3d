//! Drawing-state core for the swim path tracing canvas.
//!
//! The user clicks to lay down connected line segments over a background image
//! and the engine reports the heading and distance of the line under the cursor,
//! scaled from pixels to the tool's distance unit. The camera can pan and zoom
//! over a bounded virtual canvas. The host JavaScript layer is responsible only
//! for wiring DOM events to the engine and showing the readouts it emits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`segments`] | Segment/edge model and its owning store |
//! | [`geometry`] | Distance, heading, and compass-sector math |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the interaction mode machine |
//! | [`throttle`] | Rate limiter for cursor previews |
//! | [`render`] | Drawing-surface abstraction and the redraw routine |
//! | [`config`] | Construction-time options and their validation |
//! | [`consts`] | Shared numeric constants (zoom limits, defaults, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod render;
pub mod segments;
pub mod throttle;
