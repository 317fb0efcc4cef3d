//! Engine configuration supplied by the host at construction time.
//!
//! The host passes a JSON object with camelCase keys; absent keys fall back to
//! the defaults in `consts`. Every numeric option must be finite and
//! positive.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use tracing::{info, warn};

use crate::camera::Extent;
use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DISTANCE_SCALE_FACTOR, DEFAULT_MARKER_RADIUS,
    DEFAULT_REFRESH_RATE_HZ, DEFAULT_STROKE_WIDTH,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("distanceScaleFactor must be a positive number, got {0}")]
    InvalidScaleFactor(f64),
    #[error("refreshRateHz must be a positive number, got {0}")]
    InvalidRefreshRate(f64),
    #[error("strokeWidth must be a positive number, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("markerRadius must be a positive number, got {0}")]
    InvalidMarkerRadius(f64),
    #[error("canvas extent must be positive, got {width}x{height}")]
    InvalidCanvasExtent { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Pixels per reported distance unit; also the grid spacing.
    pub distance_scale_factor: f64,
    /// Maximum cursor preview refreshes per second.
    pub refresh_rate_hz: f64,
    /// CSS color of committed and preview lines.
    pub stroke_style: String,
    /// Line width in CSS pixels.
    pub stroke_width: f64,
    /// Vertex marker radius in world units.
    pub marker_radius: f64,
    /// CSS color of vertex markers.
    pub marker_style: String,
    /// Draw the background measurement grid.
    pub show_grid: bool,
    /// Virtual canvas width in world units.
    pub canvas_width: f64,
    /// Virtual canvas height in world units.
    pub canvas_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            distance_scale_factor: DEFAULT_DISTANCE_SCALE_FACTOR,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            stroke_style: "orange".into(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            marker_radius: DEFAULT_MARKER_RADIUS,
            marker_style: "black".into(),
            show_grid: true,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from the host's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields, and
    /// the matching validation error for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejected engine config");
            return Err(e);
        }
        info!(
            scale = config.distance_scale_factor,
            refresh_hz = config.refresh_rate_hz,
            canvas_w = config.canvas_width,
            canvas_h = config.canvas_height,
            "engine config loaded"
        );
        Ok(config)
    }

    /// Check every numeric option is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns the first failing option's error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.distance_scale_factor) {
            return Err(ConfigError::InvalidScaleFactor(self.distance_scale_factor));
        }
        if !is_positive(self.refresh_rate_hz) {
            return Err(ConfigError::InvalidRefreshRate(self.refresh_rate_hz));
        }
        if !is_positive(self.stroke_width) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        if !is_positive(self.marker_radius) {
            return Err(ConfigError::InvalidMarkerRadius(self.marker_radius));
        }
        if !is_positive(self.canvas_width) || !is_positive(self.canvas_height) {
            return Err(ConfigError::InvalidCanvasExtent { width: self.canvas_width, height: self.canvas_height });
        }
        Ok(())
    }

    /// Size of the virtual canvas.
    #[must_use]
    pub fn canvas_extent(&self) -> Extent {
        Extent::new(self.canvas_width, self.canvas_height)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
