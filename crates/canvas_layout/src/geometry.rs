//! Page geometry

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Unit of page geometry and cursor positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// PDF points (1/72 inch)
    Pt,
    /// Millimetres
    #[default]
    Mm,
}

impl Unit {
    /// How many PDF points one unit spans
    pub fn points_per_unit(&self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
        }
    }

    pub fn to_points(&self, value: f64) -> f64 {
        value * self.points_per_unit()
    }

    pub fn from_points(&self, points: f64) -> f64 {
        points / self.points_per_unit()
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// 210mm x 297mm
    #[default]
    A4,
    /// 8.5" x 11"
    Letter,
    /// 8.5" x 14"
    Legal,
}

impl PaperSize {
    /// Width and height in points
    pub fn dimensions_pt(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (595.276, 841.89),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
        }
    }

    /// Width and height in the given unit
    pub fn dimensions(&self, unit: Unit) -> (f64, f64) {
        match (self, unit) {
            // Exact values avoid drift from the point round trip
            (PaperSize::A4, Unit::Mm) => (210.0, 297.0),
            _ => {
                let (w, h) = self.dimensions_pt();
                (unit.from_points(w), unit.from_points(h))
            }
        }
    }
}

/// Page dimensions and uniform margin, all in `unit`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub unit: Unit,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64, margin: f64, unit: Unit) -> Self {
        Self {
            width,
            height,
            margin,
            unit,
        }
    }

    /// Geometry for a standard paper size
    pub fn paper(size: PaperSize, unit: Unit, margin: f64) -> Self {
        let (width, height) = size.dimensions(unit);
        Self::new(width, height, margin, unit)
    }

    /// Horizontal space available between the side margins
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Left edge of the text column
    pub fn left(&self) -> f64 {
        self.margin
    }

    /// Right edge of the text column
    pub fn right(&self) -> f64 {
        self.width - self.margin
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || !(self.width > 0.0 && self.height > 0.0)
        {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margin must not be negative, got {}",
                self.margin
            )));
        }
        if self.usable_width() <= 0.0 || self.height <= 2.0 * self.margin {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margin {} leaves no room on a {}x{} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::paper(PaperSize::A4, Unit::Mm, 20.0)
    }
}
