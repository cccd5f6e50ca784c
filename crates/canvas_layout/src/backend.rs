//! Rendering backend capability interface
//!
//! The paginator only ever needs four things from a backend: measure text,
//! start a page, draw text, draw a rule. [`PageRecorder`] is the production
//! backend; it records placed items per page for a document encoder to turn
//! into bytes afterwards.

use crate::{PageGeometry, RuleStyle, TextMetrics, TextStyle};

/// Drawing surface for the paginator.
///
/// Coordinates are in the page geometry's unit, measured from the top-left
/// corner. `y` for text is the baseline. A backend starts with one empty page.
pub trait RenderBackend {
    /// Width of `text` in layout units
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64;

    /// Start a new page; subsequent drawing lands on it
    fn add_page(&mut self);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn draw_rule(&mut self, x1: f64, x2: f64, y: f64, style: &RuleStyle);
}

/// An item placed on a page
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedItem {
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        style: RuleStyle,
    },
}

/// Items placed on one page, in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<PlacedItem>,
}

impl PageLayout {
    /// Text runs on this page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PlacedItem::Text { text, .. } => Some(text.as_str()),
            PlacedItem::Rule { .. } => None,
        })
    }
}

/// Backend that records placed items and measures with `M`
#[derive(Debug)]
pub struct PageRecorder<M> {
    metrics: M,
    geometry: PageGeometry,
    pages: Vec<PageLayout>,
}

impl<M: TextMetrics> PageRecorder<M> {
    pub fn new(metrics: M, geometry: PageGeometry) -> Self {
        Self {
            metrics,
            geometry,
            pages: vec![PageLayout::default()],
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn into_pages(self) -> Vec<PageLayout> {
        self.pages
    }

    fn current_page(&mut self) -> &mut PageLayout {
        if self.pages.is_empty() {
            self.pages.push(PageLayout::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl<M: TextMetrics> RenderBackend for PageRecorder<M> {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        self.geometry
            .unit
            .from_points(self.metrics.text_width(text, style))
    }

    fn add_page(&mut self) {
        self.pages.push(PageLayout::default());
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.current_page().items.push(PlacedItem::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }

    fn draw_rule(&mut self, x1: f64, x2: f64, y: f64, style: &RuleStyle) {
        self.current_page().items.push(PlacedItem::Rule {
            x1,
            x2,
            y,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedMetrics, Rgb, Unit};

    #[test]
    fn test_recorder_starts_with_one_page() {
        let recorder = PageRecorder::new(FixedMetrics::default(), PageGeometry::default());
        assert_eq!(recorder.page_count(), 1);
        assert!(recorder.pages()[0].items.is_empty());
    }

    #[test]
    fn test_recorder_places_items_on_current_page() {
        let mut recorder = PageRecorder::new(FixedMetrics::default(), PageGeometry::default());
        let style = TextStyle::regular(10.0, Rgb::BLACK);

        recorder.draw_text("one", 20.0, 20.0, &style);
        recorder.add_page();
        recorder.draw_text("two", 20.0, 20.0, &style);
        recorder.draw_rule(20.0, 190.0, 30.0, &RuleStyle::new(0.5, Rgb::BLACK));

        let pages = recorder.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().collect::<Vec<_>>(), vec!["one"]);
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), vec!["two"]);
        assert_eq!(pages[1].items.len(), 2);
    }

    #[test]
    fn test_measure_converts_points_to_units() {
        let geometry = PageGeometry::default();
        let recorder = PageRecorder::new(FixedMetrics::new(0.5), geometry);
        let style = TextStyle::regular(72.0 / 0.5, Rgb::BLACK);

        // One character is 72pt wide, i.e. exactly one inch
        let width = recorder.measure_text("x", &style);
        assert!((width - 25.4).abs() < 1e-9);
        assert_eq!(geometry.unit, Unit::Mm);
    }
}
