//! PDF Page Renderer
//!
//! Turns a recorded [`PageLayout`] into a content stream. Layout positions
//! are top-down in layout units; PDF user space is bottom-up in points, so
//! every coordinate goes through [`PdfRenderer::to_pdf`].

use super::content::ContentStream;
use super::fonts::{encode_win_ansi, FontFamily, FontManager, StandardFont};
use canvas_layout::{PageGeometry, PageLayout, PlacedItem, Rgb, RuleStyle, TextStyle};

/// PDF page renderer
pub struct PdfRenderer {
    font_manager: FontManager,
    family: FontFamily,
    geometry: PageGeometry,
}

impl PdfRenderer {
    pub fn new(geometry: PageGeometry, family: FontFamily) -> Self {
        Self {
            font_manager: FontManager::new(),
            family,
            geometry,
        }
    }

    /// Fonts referenced by every page rendered so far
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }

    /// Page size in points
    pub fn page_size_pt(&self) -> (f64, f64) {
        let unit = self.geometry.unit;
        (
            unit.to_points(self.geometry.width),
            unit.to_points(self.geometry.height),
        )
    }

    /// Convert a top-down layout position to PDF user space
    pub fn to_pdf(&self, x: f64, y: f64) -> (f64, f64) {
        let unit = self.geometry.unit;
        let (_, page_height) = self.page_size_pt();
        (unit.to_points(x), page_height - unit.to_points(y))
    }

    /// Render a page to a content stream
    pub fn render_page(&mut self, page: &PageLayout) -> ContentStream {
        let mut content = ContentStream::new();

        // Rules first so text is never painted over
        for item in &page.items {
            if let PlacedItem::Rule { x1, x2, y, style } = item {
                self.render_rule(&mut content, *x1, *x2, *y, style);
            }
        }

        let mut in_text = false;
        let mut current_font: Option<(StandardFont, f64)> = None;
        let mut current_color: Option<Rgb> = None;

        for item in &page.items {
            let PlacedItem::Text { text, x, y, style } = item else {
                continue;
            };
            if !in_text {
                content.begin_text();
                in_text = true;
            }
            self.render_text(
                &mut content,
                text,
                (*x, *y),
                style,
                &mut current_font,
                &mut current_color,
            );
        }

        if in_text {
            content.end_text();
        }
        content
    }

    fn render_text(
        &mut self,
        content: &mut ContentStream,
        text: &str,
        (x, y): (f64, f64),
        style: &TextStyle,
        current_font: &mut Option<(StandardFont, f64)>,
        current_color: &mut Option<Rgb>,
    ) {
        let font = StandardFont::new(self.family, style.bold);
        if *current_font != Some((font, style.size)) {
            let resource = self.font_manager.resource_name(font).to_string();
            content.set_font(&resource, style.size);
            *current_font = Some((font, style.size));
        }

        if *current_color != Some(style.color) {
            content.set_fill_rgb(style.color.to_unit());
            *current_color = Some(style.color);
        }

        let (pdf_x, pdf_y) = self.to_pdf(x, y);
        content.set_text_position(pdf_x, pdf_y);
        content.show_text(&encode_win_ansi(text));
    }

    fn render_rule(&self, content: &mut ContentStream, x1: f64, x2: f64, y: f64, style: &RuleStyle) {
        let (start_x, pdf_y) = self.to_pdf(x1, y);
        let (end_x, _) = self.to_pdf(x2, y);

        content
            .save_state()
            .set_stroke_rgb(style.color.to_unit())
            .set_line_width(style.width)
            .move_to(start_x, pdf_y)
            .line_to(end_x, pdf_y)
            .stroke()
            .restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_layout::{PaperSize, Unit};

    fn content_text(content: ContentStream) -> String {
        String::from_utf8(content.into_bytes()).unwrap()
    }

    #[test]
    fn test_millimetres_convert_to_points_with_flip() {
        let renderer = PdfRenderer::new(PageGeometry::default(), FontFamily::Helvetica);
        let (x, y) = renderer.to_pdf(25.4, 0.0);
        assert!((x - 72.0).abs() < 1e-9);
        assert!((y - 841.8898).abs() < 1e-3);

        let (_, bottom) = renderer.to_pdf(0.0, 297.0);
        assert!(bottom.abs() < 1e-9);
    }

    #[test]
    fn test_point_geometry_is_identity_apart_from_flip() {
        let geometry = PageGeometry::paper(PaperSize::Letter, Unit::Pt, 72.0);
        let renderer = PdfRenderer::new(geometry, FontFamily::Helvetica);
        assert_eq!(renderer.to_pdf(72.0, 100.0), (72.0, 692.0));
    }

    #[test]
    fn test_render_text_and_rule() {
        let geometry = PageGeometry::paper(PaperSize::Letter, Unit::Pt, 72.0);
        let mut renderer = PdfRenderer::new(geometry, FontFamily::Helvetica);

        let page = PageLayout {
            items: vec![
                PlacedItem::Text {
                    text: "Business".into(),
                    x: 72.0,
                    y: 100.0,
                    style: TextStyle::bold(16.0, Rgb::new(59, 130, 246)),
                },
                PlacedItem::Rule {
                    x1: 72.0,
                    x2: 540.0,
                    y: 110.0,
                    style: RuleStyle::new(0.5, Rgb::BLACK),
                },
            ],
        };

        let text = content_text(renderer.render_page(&page));
        assert!(text.contains("72 682 m\n540 682 l\nS\n"));
        assert!(text.contains("/F1 16 Tf"));
        assert!(text.contains("1 0 0 1 72 692 Tm\n(Business) Tj"));
        // The rule is emitted before the text object
        assert!(text.find(" m\n").unwrap() < text.find("BT").unwrap());
        assert_eq!(renderer.font_manager().font_count(), 1);
    }

    #[test]
    fn test_font_and_colour_only_change_when_needed() {
        let geometry = PageGeometry::paper(PaperSize::Letter, Unit::Pt, 72.0);
        let mut renderer = PdfRenderer::new(geometry, FontFamily::Helvetica);
        let body = TextStyle::regular(10.0, Rgb::new(55, 65, 81));

        let page = PageLayout {
            items: (0..3)
                .map(|i| PlacedItem::Text {
                    text: format!("line {i}"),
                    x: 72.0,
                    y: 100.0 + i as f64 * 14.0,
                    style: body,
                })
                .collect(),
        };

        let text = content_text(renderer.render_page(&page));
        assert_eq!(text.matches(" Tf").count(), 1);
        assert_eq!(text.matches(" rg").count(), 1);
        assert_eq!(text.matches(" Tj").count(), 3);
    }

    #[test]
    fn test_empty_page_renders_nothing() {
        let mut renderer = PdfRenderer::new(PageGeometry::default(), FontFamily::Helvetica);
        assert!(renderer.render_page(&PageLayout::default()).is_empty());
    }
}
