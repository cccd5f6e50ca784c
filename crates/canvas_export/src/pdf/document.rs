//! PDF Document Structure
//!
//! Catalog, page tree, page objects and the Info dictionary.

use super::objects::{PdfDictionary, PdfObject};
use chrono::{DateTime, FixedOffset};

/// PDF version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfVersion {
    /// PDF 1.4 (Acrobat 5)
    #[default]
    V1_4,
    /// PDF 1.7 (Acrobat 8)
    V1_7,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    /// Creator application
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self {
            producer: Some(format!("canvas_export {}", env!("CARGO_PKG_VERSION"))),
            ..Default::default()
        }
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                dict.insert(key, PdfObject::text(value));
            }
        }
        if !self.keywords.is_empty() {
            dict.insert("Keywords", PdfObject::text(&self.keywords.join(", ")));
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(&date)));
        }

        dict
    }
}

/// Format a timestamp as a PDF date string, e.g. `D:20240305143009+01'00'`
pub fn pdf_date(date: &DateTime<FixedOffset>) -> String {
    let offset = date.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    format!(
        "D:{}{}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        sign,
        offset / 3600,
        (offset % 3600) / 60
    )
}

/// Page media box in points, origin at lower-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_array(&self) -> PdfObject {
        PdfObject::Array(vec![
            PdfObject::int(0),
            PdfObject::int(0),
            PdfObject::real(self.width),
            PdfObject::real(self.height),
        ])
    }
}

/// Build a page dictionary referencing its content stream and fonts
pub fn create_page(
    parent_ref: u32,
    media_box: MediaBox,
    content_ref: u32,
    fonts: &[(String, u32)],
) -> PdfDictionary {
    let mut font_dict = PdfDictionary::new();
    for (name, obj_ref) in fonts {
        font_dict.insert(name.clone(), PdfObject::reference(*obj_ref));
    }

    let mut resources = PdfDictionary::new();
    if !font_dict.is_empty() {
        resources.insert("Font", font_dict.into());
    }
    resources.insert(
        "ProcSet",
        PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
    );

    let mut dict = PdfDictionary::new().with_type("Page");
    dict.insert("Parent", PdfObject::reference(parent_ref));
    dict.insert("MediaBox", media_box.to_array());
    dict.insert("Resources", resources.into());
    dict.insert("Contents", PdfObject::reference(content_ref));
    dict
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::reference(pages_ref));
    dict
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");
    let kids = page_refs.iter().map(|&r| PdfObject::reference(r)).collect();
    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::int(page_refs.len() as i64));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date_with_offset() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let date = offset.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
        assert_eq!(pdf_date(&date), "D:20240305143009+05'30'");

        let west = FixedOffset::west_opt(7 * 3600).unwrap();
        let date = west.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(pdf_date(&date), "D:20241231230000-07'00'");
    }

    #[test]
    fn test_document_info() {
        let mut info = DocumentInfo::new();
        info.title = Some("Roadmap".to_string());
        info.keywords = vec!["strategy".into(), "canvas".into()];

        let dict = info.to_dictionary();
        assert!(dict.get("Title").is_some());
        assert!(dict.get("Producer").is_some());
        assert_eq!(dict.get("Keywords"), Some(&PdfObject::text("strategy, canvas")));
        assert!(dict.get("Author").is_none());
        assert!(dict.get("CreationDate").is_none());
    }

    #[test]
    fn test_page_dictionary() {
        let page = create_page(2, MediaBox::from_dimensions(595.0, 842.0), 7, &[("F1".into(), 5)]);
        assert_eq!(page.get("Parent"), Some(&PdfObject::reference(2)));
        assert_eq!(page.get("Contents"), Some(&PdfObject::reference(7)));
        let Some(PdfObject::Dictionary(resources)) = page.get("Resources") else {
            panic!("missing resources");
        };
        assert!(resources.get("Font").is_some());
    }

    #[test]
    fn test_create_pages_counts_kids() {
        let pages = create_pages(&[3, 5, 7]);
        assert_eq!(pages.get("Count"), Some(&PdfObject::int(3)));
    }
}
