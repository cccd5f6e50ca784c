//! PDF Font Handling
//!
//! Exports use the standard-14 Type1 fonts, which every viewer provides, so
//! nothing is embedded. Text is encoded as WinAnsi (CP-1252); characters
//! outside that set become `?`. Measuring goes through the same encoding and
//! the Adobe AFM advance widths, which keeps wrapping consistent with what
//! the viewer draws.

use super::objects::{PdfDictionary, PdfObject};
use canvas_layout::{TextMetrics, TextStyle};

/// Standard font families supported for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

impl FontFamily {
    /// Match a family name loosely (e.g. "Arial" -> Helvetica)
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.contains("helvetica") || lower.contains("arial") || lower.contains("sans") {
            return Some(FontFamily::Helvetica);
        }
        if lower.contains("courier") || lower.contains("mono") {
            return Some(FontFamily::Courier);
        }
        None
    }
}

/// A standard-14 font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub fn new(family: FontFamily, bold: bool) -> Self {
        match (family, bold) {
            (FontFamily::Helvetica, false) => StandardFont::Helvetica,
            (FontFamily::Helvetica, true) => StandardFont::HelveticaBold,
            (FontFamily::Courier, false) => StandardFont::Courier,
            (FontFamily::Courier, true) => StandardFont::CourierBold,
        }
    }

    /// The BaseFont name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Advance width of one WinAnsi byte, in 1/1000 em
    pub fn byte_width(&self, byte: u8) -> u16 {
        match self {
            StandardFont::Courier | StandardFont::CourierBold => {
                if byte < 0x20 {
                    0
                } else {
                    600
                }
            }
            StandardFont::Helvetica => helvetica_width(byte, &HELVETICA_ASCII, &HELVETICA_EXTRA),
            StandardFont::HelveticaBold => {
                helvetica_width(byte, &HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_EXTRA)
            }
        }
    }

    /// Width of `text` in points at `size`
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .iter()
            .map(|&b| self.byte_width(b) as u32)
            .sum();
        units as f64 * size / 1000.0
    }
}

fn helvetica_width(byte: u8, ascii: &[u16; 95], extra: &[(u8, u16)]) -> u16 {
    match byte {
        0x20..=0x7E => ascii[(byte - 0x20) as usize],
        0x00..=0x1F => 0,
        0xA0 => 278,
        _ => extra
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, w)| *w)
            .unwrap_or(556),
    }
}

// AFM advance widths for codes 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Punctuation in the 0x80..0x9F block that differs noticeably from the fallback
const HELVETICA_EXTRA: [(u8, u16); 8] = [
    (0x85, 1000), (0x91, 222), (0x92, 222), (0x93, 333),
    (0x94, 333), (0x95, 350), (0x96, 556), (0x97, 1000),
];

const HELVETICA_BOLD_EXTRA: [(u8, u16); 8] = [
    (0x85, 1000), (0x91, 278), (0x92, 278), (0x93, 500),
    (0x94, 500), (0x95, 350), (0x96, 556), (0x97, 1000),
];

/// Encode text as WinAnsi bytes, substituting `?` for unmappable characters
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Metrics backed by the standard font width tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardFontMetrics {
    pub family: FontFamily,
}

impl StandardFontMetrics {
    pub fn new(family: FontFamily) -> Self {
        Self { family }
    }
}

impl TextMetrics for StandardFontMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        StandardFont::new(self.family, style.bold).text_width(text, style.size)
    }
}

/// Information about a font resource in the PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    /// Resource name (e.g., "F1")
    pub name: String,
    pub standard_font: StandardFont,
}

/// Assigns resource names to fonts in first-use order
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: Vec<FontInfo>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name for `font`, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> &str {
        let index = match self.fonts.iter().position(|f| f.standard_font == font) {
            Some(index) => index,
            None => {
                self.fonts.push(FontInfo {
                    name: format!("F{}", self.fonts.len() + 1),
                    standard_font: font,
                });
                self.fonts.len() - 1
            }
        };
        &self.fonts[index].name
    }

    /// Registered fonts, in registration order
    pub fn fonts(&self) -> &[FontInfo] {
        &self.fonts
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

/// Create a font dictionary for a standard font
pub fn create_standard_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
    dict
}
