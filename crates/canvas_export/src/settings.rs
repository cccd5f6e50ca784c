//! Export settings
//!
//! Persisted as JSON. Every field has a default, so partial files are fine;
//! a file that fails to parse falls back to defaults with a warning rather
//! than blocking the export.

use crate::pdf::{FontFamily, PdfExportOptions};
use crate::Result;
use canvas_layout::{BreakThresholds, LayoutConfig, LayoutStyles, PageGeometry, PaperSize, Spacing, Unit};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Everything configurable about an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    pub paper: PaperSize,
    /// Unit for margin, spacing and thresholds
    pub unit: Unit,
    pub margin: f64,
    pub styles: LayoutStyles,
    pub spacing: Spacing,
    pub thresholds: BreakThresholds,
    /// Font family name, matched loosely against the standard fonts
    pub font_family: String,
    /// Flate-compress PDF content streams
    pub compress: bool,
    /// strftime pattern for the export date
    pub date_format: String,
    /// strftime pattern for the export time
    pub time_format: String,
    pub author: Option<String>,
    pub creator: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            unit: Unit::Mm,
            margin: 20.0,
            styles: LayoutStyles::default(),
            spacing: Spacing::default(),
            thresholds: BreakThresholds::default(),
            font_family: "Helvetica".to_string(),
            compress: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            author: None,
            creator: None,
        }
    }
}

impl ExportSettings {
    /// Load settings from `path`.
    ///
    /// A missing file yields defaults. An unparsable file is logged and also
    /// yields defaults. Other IO failures are returned.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<ExportSettings>(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse export settings {}, using defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::paper(self.paper, self.unit, self.margin)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            geometry: self.geometry(),
            styles: self.styles.clone(),
            spacing: self.spacing.clone(),
            thresholds: self.thresholds,
        }
    }

    /// Standard font family to render with; unknown names fall back to Helvetica
    pub fn font(&self) -> FontFamily {
        FontFamily::from_name(&self.font_family).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown font family '{}', falling back to Helvetica",
                self.font_family
            );
            FontFamily::Helvetica
        })
    }

    /// PDF options for a document titled `title`
    pub fn pdf_options(&self, title: &str) -> PdfExportOptions {
        let mut options = PdfExportOptions::new()
            .with_title(title)
            .with_compression(self.compress);
        options.author = self.author.clone();
        options.creator = self.creator.clone();
        options
    }

    /// `Exported on: <date> at <time>` for `at`, in its own time zone
    pub fn timestamp_line<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let date = at.format(checked_format(&self.date_format, DEFAULT_DATE_FORMAT));
        let time = at.format(checked_format(&self.time_format, DEFAULT_TIME_FORMAT));
        format!("Exported on: {} at {}", date, time)
    }
}

/// Use `pattern` if chrono can parse it; formatting an invalid pattern panics
fn checked_format<'a>(pattern: &'a str, fallback: &'static str) -> &'a str {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        tracing::warn!("Invalid date/time format '{}', using '{}'", pattern, fallback);
        fallback
    } else {
        pattern
    }
}
