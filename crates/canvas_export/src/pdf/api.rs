//! PDF Export Public API

use super::fonts::FontFamily;
use super::options::PdfExportOptions;
use super::writer::{PdfDocumentWriter, PdfError, Result};
use canvas_layout::{PageGeometry, PageLayout};

/// Encode recorded pages as PDF bytes in memory
///
/// # Example
///
/// ```ignore
/// use canvas_export::pdf::{export_pdf_bytes, FontFamily, PdfExportOptions};
///
/// let options = PdfExportOptions::new().with_title("Roadmap");
/// let bytes = export_pdf_bytes(&pages, geometry, FontFamily::Helvetica, options)?;
/// ```
pub fn export_pdf_bytes(
    pages: &[PageLayout],
    geometry: PageGeometry,
    family: FontFamily,
    options: PdfExportOptions,
) -> Result<Vec<u8>> {
    validate_geometry(&geometry)?;
    PdfDocumentWriter::new(options, geometry, family).write(pages, Vec::new())
}

/// Reject page geometry that cannot be expressed as a media box
pub fn validate_geometry(geometry: &PageGeometry) -> Result<()> {
    if !(geometry.width > 0.0 && geometry.height > 0.0) {
        return Err(PdfError::InvalidDocument(format!(
            "page dimensions must be positive, got {}x{}",
            geometry.width, geometry.height
        )));
    }
    Ok(())
}
