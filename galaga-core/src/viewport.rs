use serde::{Deserialize, Serialize};

use crate::constants::{REF_HEIGHT, REF_WIDTH};

/// Current drawing surface size in pixels.
///
/// Positions live in normalized units (fractions of width/height, y grows
/// downward) so a resize never touches stored entities; only pixel lengths
/// derived through [`Viewport::scale`] change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const REFERENCE: Viewport = Viewport {
        width: REF_WIDTH,
        height: REF_HEIGHT,
    };

    /// Degenerate sizes are clamped to one pixel so normalization never divides by zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: if width.is_finite() { width.max(1.0) } else { REF_WIDTH },
            height: if height.is_finite() { height.max(1.0) } else { REF_HEIGHT },
        }
    }

    /// Uniform scale relative to the reference resolution. The smaller axis
    /// ratio wins so neither axis dominates on odd aspect ratios.
    #[inline]
    pub fn scale(&self) -> f64 {
        (self.width / REF_WIDTH).min(self.height / REF_HEIGHT)
    }

    /// Reference-resolution length to scaled pixels.
    #[inline]
    pub fn scaled(&self, base: f64) -> f64 {
        base * self.scale()
    }

    /// Reference-resolution horizontal length as a fraction of the width.
    #[inline]
    pub fn norm_x(&self, base: f64) -> f64 {
        self.scaled(base) / self.width
    }

    /// Reference-resolution vertical length as a fraction of the height.
    #[inline]
    pub fn norm_y(&self, base: f64) -> f64 {
        self.scaled(base) / self.height
    }

    #[inline]
    pub fn x_to_px(&self, x: f64) -> f64 {
        x * self.width
    }

    #[inline]
    pub fn y_to_px(&self, y: f64) -> f64 {
        y * self.height
    }

    #[inline]
    pub fn px_to_x(&self, px: f64) -> f64 {
        px / self.width
    }

    #[inline]
    pub fn px_to_y(&self, px: f64) -> f64 {
        px / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::REFERENCE
    }
}
