//! Text and rule styles

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Font selection for a run of text. Size is always in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub fn regular(size: f64, color: Rgb) -> Self {
        Self {
            size,
            bold: false,
            color,
        }
    }

    pub fn bold(size: f64, color: Rgb) -> Self {
        Self {
            size,
            bold: true,
            color,
        }
    }
}

/// Horizontal separator rule. Width is in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleStyle {
    pub width: f64,
    pub color: Rgb,
}

impl RuleStyle {
    pub fn new(width: f64, color: Rgb) -> Self {
        Self { width, color }
    }
}
