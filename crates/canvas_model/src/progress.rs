//! Completion tracking for the canvas editor badges

use crate::{CanvasData, CanvasSchema};
use serde::{Deserialize, Serialize};

/// Filled/total counts for one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProgress {
    pub tab_id: String,
    pub filled: usize,
    pub total: usize,
}

impl TabProgress {
    /// A tab is complete when every one of its sections is filled
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.filled == self.total
    }

    pub fn percent(&self) -> u8 {
        percent(self.filled, self.total)
    }
}

/// Completion snapshot for a whole canvas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasProgress {
    pub tabs: Vec<TabProgress>,
    pub filled: usize,
    pub total: usize,
}

impl CanvasProgress {
    /// Count filled sections per tab
    pub fn compute(data: &CanvasData, schema: &CanvasSchema) -> Self {
        let tabs: Vec<TabProgress> = schema
            .tabs()
            .iter()
            .map(|tab| TabProgress {
                tab_id: tab.id.clone(),
                filled: tab
                    .sections
                    .iter()
                    .filter(|section| data.is_filled(&section.key))
                    .count(),
                total: tab.sections.len(),
            })
            .collect();

        let filled = tabs.iter().map(|t| t.filled).sum();
        let total = tabs.iter().map(|t| t.total).sum();

        Self { tabs, filled, total }
    }

    /// Overall completion, rounded down to a whole percent
    pub fn percent(&self) -> u8 {
        percent(self.filled, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.filled == self.total
    }

    pub fn tab(&self, tab_id: &str) -> Option<&TabProgress> {
        self.tabs.iter().find(|t| t.tab_id == tab_id)
    }

    /// Milestones reached at this snapshot, ascending
    pub fn milestones(&self) -> Vec<Milestone> {
        Milestone::ALL
            .into_iter()
            .filter(|m| m.is_reached(self))
            .collect()
    }
}

fn percent(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((filled.min(total) * 100) / total) as u8
}

/// Celebration points along the way to a complete canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Milestone {
    /// First section filled
    Started,
    Quarter,
    Half,
    ThreeQuarters,
    Complete,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Milestone::Started,
        Milestone::Quarter,
        Milestone::Half,
        Milestone::ThreeQuarters,
        Milestone::Complete,
    ];

    pub fn is_reached(&self, progress: &CanvasProgress) -> bool {
        let pct = progress.percent();
        match self {
            Milestone::Started => progress.filled > 0,
            Milestone::Quarter => pct >= 25,
            Milestone::Half => pct >= 50,
            Milestone::ThreeQuarters => pct >= 75,
            Milestone::Complete => progress.is_complete(),
        }
    }

    /// Milestones newly reached when moving from `previous` to `current`
    pub fn crossed(previous: &CanvasProgress, current: &CanvasProgress) -> Vec<Milestone> {
        Milestone::ALL
            .into_iter()
            .filter(|m| m.is_reached(current) && !m.is_reached(previous))
            .collect()
    }
}
