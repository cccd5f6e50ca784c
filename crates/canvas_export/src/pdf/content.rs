//! PDF Content Stream Generation
//!
//! Builder for the page-description operators a canvas page needs:
//!
//! - q/Q: save/restore graphics state
//! - w, m, l, S: stroked rules
//! - rg/RG: RGB fill and stroke colour
//! - BT/ET, Tf, Tm, Tj: positioned text runs

use super::objects::{escape_string_bytes, format_real};
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Graphics State
    // =========================================================================

    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_fmt(format_args!("{} w\n", format_real(width)));
        self
    }

    // =========================================================================
    // Colour
    // =========================================================================

    /// Set the fill colour (rg); components in 0..=1
    pub fn set_fill_rgb(&mut self, (r, g, b): (f64, f64, f64)) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} rg\n",
            format_real(r),
            format_real(g),
            format_real(b)
        ));
        self
    }

    /// Set the stroke colour (RG); components in 0..=1
    pub fn set_stroke_rgb(&mut self, (r, g, b): (f64, f64, f64)) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} RG\n",
            format_real(r),
            format_real(g),
            format_real(b)
        ));
        self
    }

    // =========================================================================
    // Paths
    // =========================================================================

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} m\n", format_real(x), format_real(y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} l\n", format_real(x), format_real(y)));
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", resource, format_real(size)));
        self
    }

    /// Place the text origin at `(x, y)` with no scaling or rotation
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "1 0 0 1 {} {} Tm\n",
            format_real(x),
            format_real(y)
        ));
        self
    }

    /// Show an already-encoded string (Tj)
    pub fn show_text(&mut self, encoded: &[u8]) -> &mut Self {
        self.data.push(b'(');
        self.data.extend_from_slice(&escape_string_bytes(encoded));
        self.write_line(") Tj");
        self
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a Vec cannot fail
        let _ = self.data.write_fmt(args);
    }
}
