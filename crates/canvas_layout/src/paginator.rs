//! Canvas Pagination
//!
//! Flows an export outline onto pages with a single vertical cursor:
//!
//! - Document title and export timestamp at the top of the first page
//! - Per tab: heading-threshold break check, tab title, separator rule
//! - Per visible section: heading-threshold break check, section title,
//!   wrapped body lines each preceded by a line-threshold break check
//! - Fixed gaps after each section and each tab
//!
//! A break check fires when the cursor has moved past
//! `page_height - threshold`; the backend then starts a new page and the
//! cursor returns to the top margin.

use crate::{
    wrap_text, LayoutError, PageGeometry, RenderBackend, Result, Rgb, RuleStyle, TextStyle,
};
use canvas_model::CanvasOutline;
use serde::{Deserialize, Serialize};

/// Primary heading color used for tab titles
pub const HEADING_BLUE: Rgb = Rgb::new(59, 130, 246);

/// Vertical advances, in layout units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    pub after_title: f64,
    pub after_timestamp: f64,
    pub after_tab_title: f64,
    pub after_rule: f64,
    pub after_section_title: f64,
    /// Advance after each body line
    pub line_height: f64,
    pub after_section: f64,
    pub after_tab: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_title: 10.0,
            after_timestamp: 15.0,
            after_tab_title: 8.0,
            after_rule: 10.0,
            after_section_title: 7.0,
            line_height: 5.0,
            after_section: 5.0,
            after_tab: 10.0,
        }
    }
}

impl Spacing {
    fn advances(&self) -> [(&'static str, f64); 8] {
        [
            ("afterTitle", self.after_title),
            ("afterTimestamp", self.after_timestamp),
            ("afterTabTitle", self.after_tab_title),
            ("afterRule", self.after_rule),
            ("afterSectionTitle", self.after_section_title),
            ("lineHeight", self.line_height),
            ("afterSection", self.after_section),
            ("afterTab", self.after_tab),
        ]
    }
}

/// Distance from the bottom page edge at which a break is forced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreakThresholds {
    /// Checked before tab and section titles
    pub heading: f64,
    /// Checked before every body line
    pub line: f64,
}

impl Default for BreakThresholds {
    fn default() -> Self {
        Self {
            heading: 40.0,
            line: 20.0,
        }
    }
}

/// Styles for each kind of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutStyles {
    pub title: TextStyle,
    pub timestamp: TextStyle,
    pub tab_title: TextStyle,
    pub section_title: TextStyle,
    pub body: TextStyle,
    pub rule: RuleStyle,
}

impl Default for LayoutStyles {
    fn default() -> Self {
        Self {
            title: TextStyle::bold(20.0, Rgb::BLACK),
            timestamp: TextStyle::regular(10.0, Rgb::new(107, 114, 128)),
            tab_title: TextStyle::bold(16.0, HEADING_BLUE),
            section_title: TextStyle::bold(12.0, Rgb::BLACK),
            body: TextStyle::regular(10.0, Rgb::new(55, 65, 81)),
            rule: RuleStyle::new(0.5, Rgb::new(209, 213, 219)),
        }
    }
}

/// Complete layout configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    pub styles: LayoutStyles,
    pub spacing: Spacing,
    pub thresholds: BreakThresholds,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;

        if !(self.spacing.line_height.is_finite() && self.spacing.line_height > 0.0) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "line height must be positive, got {}",
                self.spacing.line_height
            )));
        }
        for (name, advance) in self.spacing.advances() {
            if !(advance.is_finite() && advance >= 0.0) {
                return Err(LayoutError::InvalidPageSetup(format!(
                    "{} spacing must not be negative, got {}",
                    name, advance
                )));
            }
        }

        // After a break the cursor sits at the top margin; a larger threshold
        // would break again before every item.
        let limit = self.geometry.height - self.geometry.margin;
        for (name, threshold) in [
            ("heading", self.thresholds.heading),
            ("line", self.thresholds.line),
        ] {
            if !(threshold.is_finite() && (0.0..=limit).contains(&threshold)) {
                return Err(LayoutError::InvalidPageSetup(format!(
                    "{} break threshold {} must lie in [0, {}]",
                    name, threshold, limit
                )));
            }
        }

        Ok(())
    }
}

/// Vertical layout state threaded through the paginator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Baseline of the next item, from the top page edge
    pub y: f64,
    /// Zero-based index of the current page
    pub page: usize,
}

impl LayoutCursor {
    /// Cursor at the top margin of the first page
    pub fn new(top: f64) -> Self {
        Self { y: top, page: 0 }
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }
}

/// Result of a pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSummary {
    pub pages: usize,
    pub body_lines: usize,
}

/// Lays out canvas outlines onto a [`RenderBackend`]
#[derive(Debug, Clone)]
pub struct CanvasPaginator {
    config: LayoutConfig,
}

impl CanvasPaginator {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Break to a new page when the cursor is past `page_height - threshold`.
    ///
    /// Returns whether a break happened.
    pub fn ensure_space<B: RenderBackend + ?Sized>(
        &self,
        cursor: &mut LayoutCursor,
        backend: &mut B,
        threshold: f64,
    ) -> bool {
        let geometry = &self.config.geometry;
        if cursor.y <= geometry.height - threshold {
            return false;
        }

        backend.add_page();
        tracing::debug!(
            "Page break at y={:.2} (threshold {}), starting page {}",
            cursor.y,
            threshold,
            cursor.page + 2
        );
        cursor.page += 1;
        cursor.y = geometry.margin;
        true
    }

    /// Draw one line at the left margin and advance the cursor
    pub fn write_line<B: RenderBackend + ?Sized>(
        &self,
        cursor: &mut LayoutCursor,
        backend: &mut B,
        text: &str,
        style: &TextStyle,
        advance: f64,
    ) {
        backend.draw_text(text, self.config.geometry.left(), cursor.y, style);
        cursor.advance(advance);
    }

    /// Lay out a whole canvas outline
    pub fn paginate<B: RenderBackend + ?Sized>(
        &self,
        outline: &CanvasOutline<'_>,
        title: &str,
        timestamp_line: &str,
        backend: &mut B,
    ) -> PaginationSummary {
        let LayoutConfig {
            geometry,
            styles,
            spacing,
            thresholds,
        } = &self.config;

        let mut cursor = LayoutCursor::new(geometry.margin);
        let mut body_lines = 0;

        self.write_line(&mut cursor, backend, title, &styles.title, spacing.after_title);
        self.write_line(
            &mut cursor,
            backend,
            timestamp_line,
            &styles.timestamp,
            spacing.after_timestamp,
        );

        for tab in &outline.tabs {
            self.ensure_space(&mut cursor, backend, thresholds.heading);
            self.write_line(
                &mut cursor,
                backend,
                tab.title,
                &styles.tab_title,
                spacing.after_tab_title,
            );
            backend.draw_rule(geometry.left(), geometry.right(), cursor.y, &styles.rule);
            cursor.advance(spacing.after_rule);

            for section in &tab.sections {
                self.ensure_space(&mut cursor, backend, thresholds.heading);
                self.write_line(
                    &mut cursor,
                    backend,
                    section.title,
                    &styles.section_title,
                    spacing.after_section_title,
                );

                let lines = wrap_text(section.content, geometry.usable_width(), |text| {
                    backend.measure_text(text, &styles.body)
                });
                for line in &lines {
                    self.ensure_space(&mut cursor, backend, thresholds.line);
                    self.write_line(&mut cursor, backend, line, &styles.body, spacing.line_height);
                }
                body_lines += lines.len();

                cursor.advance(spacing.after_section);
            }

            cursor.advance(spacing.after_tab);
        }

        PaginationSummary {
            pages: cursor.page + 1,
            body_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_model::{CanvasData, CanvasSchema, CanvasSection, CanvasTab};

    /// Backend with one layout unit per character and a flat op log
    #[derive(Default)]
    struct FakeBackend {
        ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        AddPage,
        Text(String, f64),
        Rule(f64),
    }

    impl RenderBackend for FakeBackend {
        fn measure_text(&self, text: &str, _style: &TextStyle) -> f64 {
            text.chars().count() as f64
        }

        fn add_page(&mut self) {
            self.ops.push(Op::AddPage);
        }

        fn draw_text(&mut self, text: &str, _x: f64, y: f64, _style: &TextStyle) {
            self.ops.push(Op::Text(text.to_string(), y));
        }

        fn draw_rule(&mut self, _x1: f64, _x2: f64, y: f64, _style: &RuleStyle) {
            self.ops.push(Op::Rule(y));
        }
    }

    fn schema() -> CanvasSchema {
        CanvasSchema::new(vec![
            CanvasTab::new("biz", "Business").with_section(CanvasSection::new("idea", "Idea", "")),
        ])
    }

    fn paginator() -> CanvasPaginator {
        CanvasPaginator::new(LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_single_section_positions() {
        let data = CanvasData::new().with("idea", "Build a tool");
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);
        let mut backend = FakeBackend::default();

        let summary = paginator().paginate(&outline, "My Project", "Exported on: x", &mut backend);

        assert_eq!(summary, PaginationSummary { pages: 1, body_lines: 1 });
        assert_eq!(
            backend.ops,
            vec![
                Op::Text("My Project".into(), 20.0),
                Op::Text("Exported on: x".into(), 30.0),
                Op::Text("Business".into(), 45.0),
                Op::Rule(53.0),
                Op::Text("Idea".into(), 63.0),
                Op::Text("Build a tool".into(), 70.0),
            ]
        );
    }

    #[test]
    fn test_blank_section_draws_nothing() {
        let data = CanvasData::new().with("idea", "   ");
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);
        let mut backend = FakeBackend::default();

        let summary = paginator().paginate(&outline, "T", "E", &mut backend);

        assert_eq!(summary.body_lines, 0);
        assert!(backend.ops.contains(&Op::Text("Business".into(), 45.0)));
        assert!(!backend.ops.iter().any(|op| matches!(op, Op::Text(t, _) if t == "Idea")));
    }

    #[test]
    fn test_long_content_breaks_across_pages_in_order() {
        let content: Vec<String> = (0..200).map(|i| format!("line{i:03}")).collect();
        let data = CanvasData::new().with("idea", content.join("\n"));
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);
        let mut backend = FakeBackend::default();

        let summary = paginator().paginate(&outline, "T", "E", &mut backend);

        assert!(summary.pages >= 2);
        assert_eq!(summary.body_lines, 200);

        let body: Vec<&str> = backend
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, _) if t.starts_with("line") => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(body, content.iter().map(String::as_str).collect::<Vec<_>>());

        // The first line after a break sits at the top margin
        let first_break = backend.ops.iter().position(|op| *op == Op::AddPage).unwrap();
        assert!(matches!(&backend.ops[first_break + 1], Op::Text(_, y) if *y == 20.0));

        // No body line is placed past the line threshold
        for op in &backend.ops {
            if let Op::Text(_, y) = op {
                assert!(*y <= 297.0 - 20.0 + 5.0);
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let content = "word ".repeat(500);
        let data = CanvasData::new().with("idea", content);
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);

        let mut first = FakeBackend::default();
        let mut second = FakeBackend::default();
        paginator().paginate(&outline, "T", "E", &mut first);
        paginator().paginate(&outline, "T", "E", &mut second);

        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn test_heading_check_breaks_before_tab_title() {
        let mut schema_tabs = Vec::new();
        for i in 0..12 {
            schema_tabs.push(
                CanvasTab::new(format!("t{i}"), format!("Tab {i}"))
                    .with_section(CanvasSection::new(format!("s{i}"), "S", "")),
            );
        }
        let schema = CanvasSchema::new(schema_tabs);
        let data: CanvasData = (0..12).map(|i| (format!("s{i}"), "x")).collect();
        let outline = CanvasOutline::build(&data, &schema);
        let mut backend = FakeBackend::default();

        paginator().paginate(&outline, "T", "E", &mut backend);

        // Every page break is immediately followed by a heading at the top margin
        for (i, op) in backend.ops.iter().enumerate() {
            if *op == Op::AddPage {
                assert!(matches!(&backend.ops[i + 1], Op::Text(t, y) if *y == 20.0 && t != "x"));
            }
        }
        assert!(backend.ops.contains(&Op::AddPage));
    }

    #[test]
    fn test_ensure_space_threshold() {
        let paginator = paginator();
        let mut backend = FakeBackend::default();

        let mut cursor = LayoutCursor { y: 257.0, page: 0 };
        assert!(!paginator.ensure_space(&mut cursor, &mut backend, 40.0));

        cursor.y = 257.5;
        assert!(paginator.ensure_space(&mut cursor, &mut backend, 40.0));
        assert_eq!(cursor, LayoutCursor { y: 20.0, page: 1 });
        assert_eq!(backend.ops, vec![Op::AddPage]);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let mut config = LayoutConfig::default();
        config.thresholds.heading = 280.0;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.spacing.line_height = 0.0;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.thresholds.line = f64::NAN;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.spacing.line_height = f64::NAN;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.spacing.after_section = -500.0;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.spacing.after_tab = f64::INFINITY;
        assert!(CanvasPaginator::new(config).is_err());

        let mut config = LayoutConfig::default();
        config.geometry.margin = f64::NAN;
        assert!(CanvasPaginator::new(config).is_err());
    }

    #[test]
    fn test_threshold_at_top_margin_accepted() {
        let mut config = LayoutConfig::default();
        config.thresholds.heading = config.geometry.height - config.geometry.margin;
        assert!(CanvasPaginator::new(config).is_ok());
    }
}
