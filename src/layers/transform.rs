//! Per-layer position and scale.
//!
//! Two conventions exist:
//!
//! - **Percentage** (variant A): x, y in `[0, 100]` with `50, 50` centred;
//!   scale in percent, `100` is natural size.
//! - **Pixel** (variant B): signed pixel offsets from the centre; scale is a
//!   plain multiplier, `1.0` is natural size.
//!
//! Setters validate: non-finite values are refused, finite values are
//! clamped into the configured range.

use serde::{Deserialize, Serialize};

use crate::core::{EditError, EditorConfig, SliderRange};

/// Position axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Position + scale pair for one layer.
pub trait LayerTransform: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Valid range for x and y.
    fn position_range(config: &EditorConfig) -> SliderRange;

    /// Valid range for scale.
    fn scale_range(config: &EditorConfig) -> SliderRange;

    fn position(&self, axis: Axis) -> f64;

    fn scale(&self) -> f64;

    /// Unchecked write of one axis.
    fn put_position(&mut self, axis: Axis, value: f64);

    /// Unchecked write of the scale.
    fn put_scale(&mut self, value: f64);
}

/// Reject non-finite values and clamp the rest into `range`.
pub fn validate(what: &'static str, value: f64, range: &SliderRange) -> Result<f64, EditError> {
    if !value.is_finite() {
        return Err(EditError::NonFinite { what, value });
    }
    Ok(range.clamp(value))
}

/// Percentage-convention transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentTransform {
    pub x: f64,
    pub y: f64,
    /// Percent of natural size.
    pub scale: f64,
}

impl Default for PercentTransform {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            scale: 100.0,
        }
    }
}

impl PercentTransform {
    #[must_use]
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }
}

impl LayerTransform for PercentTransform {
    fn position_range(config: &EditorConfig) -> SliderRange {
        config.percent_position
    }

    fn scale_range(config: &EditorConfig) -> SliderRange {
        config.percent_scale
    }

    fn position(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn put_position(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    fn put_scale(&mut self, value: f64) {
        self.scale = value;
    }
}

/// Pixel-convention transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelTransform {
    pub x: f64,
    pub y: f64,
    /// Multiplier, before any per-kind correction.
    pub scale: f64,
}

impl Default for PixelTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl PixelTransform {
    #[must_use]
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }
}

impl LayerTransform for PixelTransform {
    fn position_range(config: &EditorConfig) -> SliderRange {
        config.pixel_offset
    }

    fn scale_range(config: &EditorConfig) -> SliderRange {
        config.pixel_scale
    }

    fn position(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn put_position(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    fn put_scale(&mut self, value: f64) {
        self.scale = value;
    }
}
