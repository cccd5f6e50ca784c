//! PDF Export Module
//!
//! Encodes pages recorded by the canvas paginator as PDF files.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: Catalog, page tree, page objects, Info dictionary
//! - `content`: Content stream generation (text and rule operators)
//! - `fonts`: Standard-14 fonts, WinAnsi encoding, AFM metrics
//! - `renderer`: Converts a recorded page to a content stream
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod fonts;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use fonts::{encode_win_ansi, FontFamily, StandardFont, StandardFontMetrics};
pub use options::*;

// Re-export error type
pub use writer::PdfError;
