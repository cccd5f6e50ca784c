//! Export outline
//!
//! The outline is the single traversal shared by the text and PDF renderers:
//! every tab in schema order, each holding only the sections whose content is
//! non-blank. Tabs without visible sections are still present so that their
//! header is rendered.

use crate::{CanvasData, CanvasSchema, CanvasTab};

/// A section that made it through the blank filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineSection<'a> {
    pub key: &'a str,
    pub title: &'a str,
    /// Trimmed section content, never empty
    pub content: &'a str,
}

/// A tab with its visible sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineTab<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub sections: Vec<OutlineSection<'a>>,
}

impl OutlineTab<'_> {
    /// Whether no section under this tab has content
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Filtered, ordered view of a canvas snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasOutline<'a> {
    pub tabs: Vec<OutlineTab<'a>>,
}

impl<'a> CanvasOutline<'a> {
    /// Build the outline from a schema and a snapshot
    pub fn build(data: &'a CanvasData, schema: &'a CanvasSchema) -> Self {
        Self::from_tabs(data, schema.tabs())
    }

    /// Build the outline from a bare tab slice
    pub fn from_tabs(data: &'a CanvasData, tabs: &'a [CanvasTab]) -> Self {
        let tabs = tabs
            .iter()
            .map(|tab| OutlineTab {
                id: &tab.id,
                title: &tab.title,
                sections: tab
                    .sections
                    .iter()
                    .filter_map(|section| {
                        data.content(&section.key).map(|content| OutlineSection {
                            key: &section.key,
                            title: &section.title,
                            content,
                        })
                    })
                    .collect(),
            })
            .collect();

        Self { tabs }
    }

    /// Number of sections that will be rendered
    pub fn section_count(&self) -> usize {
        self.tabs.iter().map(|tab| tab.sections.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasSection;
    use proptest::prelude::*;

    fn schema() -> CanvasSchema {
        CanvasSchema::new(vec![
            CanvasTab::new("biz", "Business")
                .with_section(CanvasSection::new("idea", "Idea", ""))
                .with_section(CanvasSection::new("market", "Market", "")),
            CanvasTab::new("dev", "Development")
                .with_section(CanvasSection::new("stack", "Stack", "")),
        ])
    }

    #[test]
    fn test_outline_keeps_schema_order() {
        let data = CanvasData::new()
            .with("market", "B2B")
            .with("idea", "Build a tool")
            .with("stack", "Rust");
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);

        let keys: Vec<_> = outline
            .tabs
            .iter()
            .flat_map(|tab| tab.sections.iter().map(|s| s.key))
            .collect();
        assert_eq!(keys, vec!["idea", "market", "stack"]);
    }

    #[test]
    fn test_empty_tab_still_present() {
        let data = CanvasData::new().with("idea", "Build a tool").with("stack", "  ");
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);

        assert_eq!(outline.tabs.len(), 2);
        assert_eq!(outline.tabs[1].title, "Development");
        assert!(outline.tabs[1].is_empty());
        assert_eq!(outline.section_count(), 1);
    }

    #[test]
    fn test_content_is_trimmed() {
        let data = CanvasData::new().with("idea", "\n  Build a tool  \n");
        let schema = schema();
        let outline = CanvasOutline::build(&data, &schema);
        assert_eq!(outline.tabs[0].sections[0].content, "Build a tool");
    }

    proptest! {
        #[test]
        fn prop_whitespace_sections_never_appear(ws in "[ \t\r\n]{0,12}") {
            let data = CanvasData::new().with("idea", ws).with("stack", "Rust");
            let schema = schema();
            let outline = CanvasOutline::build(&data, &schema);
            prop_assert!(outline.tabs[0].sections.iter().all(|s| s.key != "idea"));
            prop_assert_eq!(outline.section_count(), 1);
        }
    }
}
