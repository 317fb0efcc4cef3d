//! Input model: modifier keys, mouse buttons, keys, and the interaction mode.
//!
//! This module defines the types consumed by the engine. `Modifiers`, `Button`
//! and `Key` describe a host event. `InputState` is the engine's current
//! interaction mode, carrying the context needed to extend a segment or to
//! finish a pan.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{Camera, Point};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Escape"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space"
    }

    /// The undo shortcut letter, either case.
    #[must_use]
    pub fn is_undo_letter(&self) -> bool {
        self.0.eq_ignore_ascii_case("z")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The engine's interaction mode.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// Not drawing; the next click starts a new segment.
    #[default]
    Idle,
    /// A segment is open and follows the cursor from `anchor`.
    Drawing {
        /// World-space point of the last click; the next edge starts here.
        anchor: Point,
        /// World-space cursor of the last accepted preview, if any.
        cursor: Option<Point>,
    },
    /// The user is dragging the view.
    Panning {
        /// Screen-space point the current delta is measured from.
        anchor_screen: Point,
        /// Uncommitted camera shown while dragging.
        preview: Option<Camera>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
