//! Planar geometry for the readouts: scaled distance, screen heading, and the
//! 16-point compass rose.
//!
//! Everything here is pure. Screen coordinates grow downward, so headings are
//! computed with the Y axis inverted: a line drawn straight up the screen reads
//! as north (0°) and headings increase clockwise.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

/// Geometry failures.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A heading outside `[0, 360]` reached the compass lookup. Headings come
    /// from [`angle_degrees`], so this signals a caller bug.
    #[error("invalid heading value received: {0}")]
    InvalidHeading(f64),
}

/// Euclidean distance between two points, divided by `scale_factor`.
///
/// `scale_factor` must be positive; [`crate::config::EngineConfig::validate`]
/// guarantees that for engine callers.
#[must_use]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64, scale_factor: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1) / scale_factor
}

/// Compass heading in whole degrees from `(x1, y1)` towards `(x2, y2)`.
///
/// Up the screen is 0, right is 90, down is 180, left is 270. A zero-length
/// line reads as 90. The result is always in `[0, 360)`.
#[must_use]
pub fn angle_degrees(x1: f64, y1: f64, x2: f64, y2: f64) -> u16 {
    let delta_y = y1 - y2;
    let delta_x = x2 - x1;

    let angle = (delta_y.atan2(delta_x) - 1.0_f64.atan2(0.0)).to_degrees();
    // `360 - angle` lies in [270, 630), so the remainder is never negative.
    let heading = (-(angle - 360.0) % 360.0).round();

    // Rounding can land on 360 itself; fold it back onto north.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = heading as u16;
    whole % 360
}

/// One of the sixteen compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

/// Upper inclusive bound of each sector after north, in clockwise order.
///
/// North covers `(348, 360] ∪ [0, 11]`, one degree wider than its neighbours.
const SECTOR_UPPER_BOUNDS: [(f64, Compass); 16] = [
    (11.0, Compass::N),
    (33.0, Compass::Nne),
    (56.0, Compass::Ne),
    (78.0, Compass::Ene),
    (101.0, Compass::E),
    (123.0, Compass::Ese),
    (146.0, Compass::Se),
    (168.0, Compass::Sse),
    (191.0, Compass::S),
    (213.0, Compass::Ssw),
    (236.0, Compass::Sw),
    (258.0, Compass::Wsw),
    (281.0, Compass::W),
    (303.0, Compass::Wnw),
    (326.0, Compass::Nw),
    (348.0, Compass::Nnw),
];

impl Compass {
    /// All sixteen points, clockwise from north.
    pub const ALL: [Compass; 16] = [
        Self::N,
        Self::Nne,
        Self::Ne,
        Self::Ene,
        Self::E,
        Self::Ese,
        Self::Se,
        Self::Sse,
        Self::S,
        Self::Ssw,
        Self::Sw,
        Self::Wsw,
        Self::W,
        Self::Wnw,
        Self::Nw,
        Self::Nnw,
    ];

    /// The conventional upper-case abbreviation, e.g. `"NNE"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Nne => "NNE",
            Self::Ne => "NE",
            Self::Ene => "ENE",
            Self::E => "E",
            Self::Ese => "ESE",
            Self::Se => "SE",
            Self::Sse => "SSE",
            Self::S => "S",
            Self::Ssw => "SSW",
            Self::Sw => "SW",
            Self::Wsw => "WSW",
            Self::W => "W",
            Self::Wnw => "WNW",
            Self::Nw => "NW",
            Self::Nnw => "NNW",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a heading in degrees onto its compass sector.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidHeading`] when `heading` is outside
/// `[0, 360]` or is NaN. Out-of-range input is never clamped.
pub fn compass_direction(heading: f64) -> Result<Compass, GeometryError> {
    if !(0.0..=360.0).contains(&heading) {
        return Err(GeometryError::InvalidHeading(heading));
    }
    let sector = SECTOR_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| heading <= *upper)
        .map_or(Compass::N, |(_, sector)| *sector);
    Ok(sector)
}

/// Heading readout text, e.g. `"90° (E)"`.
///
/// # Errors
///
/// Propagates [`GeometryError::InvalidHeading`] from the compass lookup.
pub fn format_heading(angle: u16) -> Result<String, GeometryError> {
    let direction = compass_direction(f64::from(angle))?;
    Ok(format!("{angle}° ({direction})"))
}
