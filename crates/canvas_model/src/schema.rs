//! Canvas schema: tabs and their sections
//!
//! The schema is static product configuration, not user data. Its ordering
//! (tabs, then sections within each tab) is the output order of every export
//! and is never re-sorted.

use crate::{CanvasError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single labeled text field within a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSection {
    /// Lookup key into [`crate::CanvasData`]
    pub key: String,
    /// Heading rendered in exports
    pub title: String,
    /// Descriptive hint shown in the editor; not exported
    #[serde(default)]
    pub subtitle: String,
}

impl CanvasSection {
    pub fn new(key: impl Into<String>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// A named grouping of sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasTab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<CanvasSection>,
}

impl CanvasTab {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn with_section(mut self, section: CanvasSection) -> Self {
        self.sections.push(section);
        self
    }
}

/// Ordered sequence of tabs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasSchema {
    tabs: Vec<CanvasTab>,
}

impl CanvasSchema {
    pub fn new(tabs: Vec<CanvasTab>) -> Self {
        Self { tabs }
    }

    /// Parse a schema from a JSON array of tabs
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tabs(&self) -> &[CanvasTab] {
        &self.tabs
    }

    /// Iterate over every section in output order
    pub fn sections(&self) -> impl Iterator<Item = &CanvasSection> {
        self.tabs.iter().flat_map(|tab| tab.sections.iter())
    }

    /// Find a tab by id
    pub fn tab(&self, id: &str) -> Option<&CanvasTab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Check structural invariants.
    ///
    /// Tab ids must be unique and non-empty, section keys must be unique
    /// across the whole schema, and all titles must be non-blank.
    pub fn validate(&self) -> Result<()> {
        let mut tab_ids = HashSet::new();
        let mut section_keys = HashSet::new();

        for tab in &self.tabs {
            if tab.id.trim().is_empty() {
                return Err(CanvasError::InvalidSchema("tab id is empty".to_string()));
            }
            if tab.title.trim().is_empty() {
                return Err(CanvasError::InvalidSchema(format!(
                    "tab '{}' has a blank title",
                    tab.id
                )));
            }
            if !tab_ids.insert(tab.id.as_str()) {
                return Err(CanvasError::DuplicateTab(tab.id.clone()));
            }

            for section in &tab.sections {
                if section.key.trim().is_empty() {
                    return Err(CanvasError::InvalidSchema(format!(
                        "tab '{}' contains a section with an empty key",
                        tab.id
                    )));
                }
                if section.title.trim().is_empty() {
                    return Err(CanvasError::InvalidSchema(format!(
                        "section '{}' has a blank title",
                        section.key
                    )));
                }
                if !section_keys.insert(section.key.as_str()) {
                    return Err(CanvasError::DuplicateSection(section.key.clone()));
                }
            }
        }

        Ok(())
    }
}

impl From<Vec<CanvasTab>> for CanvasSchema {
    fn from(tabs: Vec<CanvasTab>) -> Self {
        Self::new(tabs)
    }
}

/// The built-in three-pillar product strategy canvas
pub fn product_strategy_canvas() -> CanvasSchema {
    CanvasSchema::new(vec![
        CanvasTab::new("business", "Business")
            .with_section(CanvasSection::new(
                "problem",
                "Problem",
                "What pain point are you solving?",
            ))
            .with_section(CanvasSection::new(
                "solution",
                "Solution",
                "How does your product address the problem?",
            ))
            .with_section(CanvasSection::new(
                "target_customers",
                "Target Customers",
                "Who feels this problem most?",
            ))
            .with_section(CanvasSection::new(
                "value_proposition",
                "Value Proposition",
                "Why will customers choose you?",
            ))
            .with_section(CanvasSection::new(
                "revenue_model",
                "Revenue Model",
                "How will the product make money?",
            ))
            .with_section(CanvasSection::new(
                "competition",
                "Competition",
                "Who else is solving this, and how are you different?",
            )),
        CanvasTab::new("development", "Development")
            .with_section(CanvasSection::new(
                "mvp_scope",
                "MVP Scope",
                "What is the smallest version worth shipping?",
            ))
            .with_section(CanvasSection::new(
                "tech_stack",
                "Tech Stack",
                "Which technologies will you build on?",
            ))
            .with_section(CanvasSection::new(
                "roadmap",
                "Roadmap",
                "What comes after the MVP?",
            ))
            .with_section(CanvasSection::new(
                "risks",
                "Risks",
                "What could block delivery?",
            )),
        CanvasTab::new("go_to_market", "Go-to-Market")
            .with_section(CanvasSection::new(
                "positioning",
                "Positioning",
                "How do you describe the product in one sentence?",
            ))
            .with_section(CanvasSection::new(
                "channels",
                "Channels",
                "Where will customers discover you?",
            ))
            .with_section(CanvasSection::new(
                "pricing",
                "Pricing",
                "What will you charge, and for which tiers?",
            ))
            .with_section(CanvasSection::new(
                "launch_plan",
                "Launch Plan",
                "How will you announce and roll out?",
            ))
            .with_section(CanvasSection::new(
                "success_metrics",
                "Success Metrics",
                "Which numbers tell you it is working?",
            )),
    ])
}
