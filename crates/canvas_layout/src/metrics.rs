//! Text measurement

use crate::TextStyle;

/// Font metrics used for both wrapping and rendering.
///
/// Widths are in points. Implementations must be pure: the same text and
/// style always measure the same.
pub trait TextMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        (**self).text_width(text, style)
    }
}

/// Monospace metrics: every character is `advance` em wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f64,
}

impl FixedMetrics {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMetrics for FixedMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        text.chars().count() as f64 * self.advance * style.size
    }
}
