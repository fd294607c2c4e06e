use serde::{Deserialize, Serialize};

use crate::zone::Rect;

/// Pixels per centimeter used when no scale is supplied
pub const DEFAULT_SCALE: f64 = 1.0;

/// Convert a percentage of a total dimension into whole centimeters
pub fn percent_to_cm(value_pct: f64, total_cm: f64) -> f64 {
    (value_pct / 100.0 * total_cm).round()
}

pub fn cm_to_px(value_cm: f64, scale: f64) -> f64 {
    value_cm * scale
}

/// Inverse of [`cm_to_px`]. A non-positive (or NaN) scale yields 0.
pub fn px_to_cm(value_px: f64, scale: f64) -> f64 {
    if scale.is_nan() || scale <= 0.0 {
        return 0.0;
    }
    value_px / scale
}

pub fn meters_to_cm(value_m: f64) -> f64 {
    value_m * 100.0
}

/// Working surface in centimeters. `scale` only matters for screen presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Centimeter rect to screen pixels
    pub fn to_px(&self, rect: &Rect) -> Rect {
        Rect::new(
            cm_to_px(rect.x, self.scale),
            cm_to_px(rect.y, self.scale),
            cm_to_px(rect.w, self.scale),
            cm_to_px(rect.h, self.scale),
        )
    }

    /// Screen-pixel rect back to centimeters
    pub fn to_cm(&self, rect: &Rect) -> Rect {
        Rect::new(
            px_to_cm(rect.x, self.scale),
            px_to_cm(rect.y, self.scale),
            px_to_cm(rect.w, self.scale),
            px_to_cm(rect.h, self.scale),
        )
    }

    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= self.width && rect.bottom() <= self.height
    }
}
