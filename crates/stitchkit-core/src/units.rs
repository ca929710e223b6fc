//! Unit conversion utilities
//!
//! Canvas coordinates are pixels; everything leaving the program (G-code
//! files, controller commands) is in millimetres. `ScaleConfig` carries the
//! two numbers that tie those together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default distance between consecutive stitches, in millimetres
pub const DEFAULT_STITCH_PITCH_MM: f64 = 2.5;

/// Smallest stitch pitch accepted from configuration, in millimetres
pub const MIN_STITCH_PITCH_MM: f64 = 0.1;

/// Default canvas resolution: 1 mm = 5 px
pub const DEFAULT_PIXELS_PER_MM: f64 = 5.0;

/// Stitch pitch and canvas-to-physical scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Distance between stitches in millimetres
    pub pitch_mm: f64,
    /// Canvas pixels per physical millimetre
    pub pixels_per_mm: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            pitch_mm: DEFAULT_STITCH_PITCH_MM,
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
        }
    }
}

impl ScaleConfig {
    /// Create a new scale configuration
    pub fn new(pitch_mm: f64, pixels_per_mm: f64) -> Self {
        Self {
            pitch_mm,
            pixels_per_mm,
        }
    }

    /// Stitch pitch expressed in canvas pixels
    pub fn pitch_px(&self) -> f64 {
        self.pitch_mm * self.pixels_per_mm
    }

    /// Convert a canvas length (px) to millimetres
    pub fn to_mm(&self, px: f64) -> f64 {
        px / self.pixels_per_mm
    }

    /// Convert millimetres to a canvas length (px)
    pub fn to_px(&self, mm: f64) -> f64 {
        mm * self.pixels_per_mm
    }

    /// Pitch at least [`MIN_STITCH_PITCH_MM`]; pixels per mm finite and
    /// strictly positive
    pub fn is_valid(&self) -> bool {
        self.pitch_mm.is_finite()
            && self.pitch_mm >= MIN_STITCH_PITCH_MM
            && self.pixels_per_mm.is_finite()
            && self.pixels_per_mm > 0.0
    }
}

impl fmt::Display for ScaleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mm/stitch @ {} px/mm",
            self.pitch_mm, self.pixels_per_mm
        )
    }
}

/// Format a millimetre value the way it is written to G-code (two decimals)
pub fn format_mm(value_mm: f64) -> String {
    let rounded = (value_mm * 100.0).round() / 100.0;
    // Avoid emitting "-0.00" for values that round to zero.
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}
