//! PDF Export Options

use super::document::{DocumentInfo, PdfVersion};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title (Info dictionary)
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Creator application
    #[serde(default)]
    pub creator: Option<String>,
    /// Whether to flate-compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub pdf_version: PdfVersionOption,
    /// Recorded as CreationDate; set per export, never persisted
    #[serde(skip)]
    pub creation_date: Option<DateTime<FixedOffset>>,
}

fn default_compress() -> bool {
    true
}

/// PDF version option for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PdfVersionOption {
    #[default]
    V14,
    V17,
}

impl From<PdfVersionOption> for PdfVersion {
    fn from(opt: PdfVersionOption) -> Self {
        match opt {
            PdfVersionOption::V14 => PdfVersion::V1_4,
            PdfVersionOption::V17 => PdfVersion::V1_7,
        }
    }
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            creator: None,
            compress: true,
            pdf_version: PdfVersionOption::default(),
            creation_date: None,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_version(mut self, version: PdfVersionOption) -> Self {
        self.pdf_version = version;
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Info dictionary contents for these options
    pub fn document_info(&self) -> DocumentInfo {
        let mut info = DocumentInfo::new();
        info.title = self.title.clone();
        info.author = self.author.clone();
        info.subject = self.subject.clone();
        info.keywords = self.keywords.clone();
        info.creator = self.creator.clone();
        info.creation_date = self.creation_date;
        info
    }
}
