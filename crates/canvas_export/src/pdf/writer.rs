//! PDF Writer
//!
//! File structure (header, numbered objects, xref table, trailer) and the
//! document-level assembly of catalog, page tree, fonts and pages.

use super::document::{create_catalog, create_page, create_pages, MediaBox, PdfVersion};
use super::fonts::{create_standard_font_dict, FontFamily};
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::PdfRenderer;
use canvas_layout::{PageGeometry, PageLayout};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Compression error: {0}")]
    Compression(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    /// Byte offset of each written object, indexed by object number - 1
    offsets: Vec<Option<u64>>,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        self.offsets.push(None);
        self.offsets.len() as u32
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        let slot = obj_num
            .checked_sub(1)
            .and_then(|i| self.offsets.get(i as usize))
            .ok_or_else(|| {
                PdfError::InvalidDocument(format!("object {} was never allocated", obj_num))
            })?;
        if slot.is_some() {
            return Err(PdfError::InvalidDocument(format!(
                "object {} written twice",
                obj_num
            )));
        }

        let offset = self.position;
        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")?;
        self.offsets[(obj_num - 1) as usize] = Some(offset);
        Ok(())
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::int(stream.data.len() as i64));
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let size = self.offsets.len() + 1;

        self.write_str(&format!("xref\n0 {}\n", size))?;
        self.write_str("0000000000 65535 f \n")?;

        let offsets = self.offsets.clone();
        for (index, offset) in offsets.iter().enumerate() {
            match offset {
                Some(offset) => self.write_str(&format!("{:010} 00000 n \n", offset))?,
                None => {
                    return Err(PdfError::InvalidDocument(format!(
                        "object {} allocated but never written",
                        index + 1
                    )))
                }
            }
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::int(size as i64));
        trailer.insert("Root", PdfObject::reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::reference(info));
        }

        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder
        .finish()
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// Assembles recorded pages into a complete PDF document
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
    geometry: PageGeometry,
    family: FontFamily,
}

impl PdfDocumentWriter {
    pub fn new(options: PdfExportOptions, geometry: PageGeometry, family: FontFamily) -> Self {
        Self {
            options,
            geometry,
            family,
        }
    }

    /// Write a complete PDF document to a writer
    pub fn write<W: Write>(&self, pages: &[PageLayout], writer: W) -> Result<W> {
        if pages.is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(writer, self.options.pdf_version.into());
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        // Render first so the font set is known before pages reference it
        let mut renderer = PdfRenderer::new(self.geometry, self.family);
        let contents: Vec<_> = pages.iter().map(|page| renderer.render_page(page)).collect();

        let mut font_refs = Vec::new();
        for font in renderer.font_manager().fonts() {
            let font_ref = pdf.allocate_object();
            font_refs.push((font.name.clone(), font.standard_font, font_ref));
        }

        let page_refs: Vec<(u32, u32)> = contents
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page_ref, _)| *page_ref).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;
        pdf.write_object(info_ref, &self.options.document_info().to_dictionary().into())?;

        for (_, font, font_ref) in &font_refs {
            pdf.write_object(*font_ref, &create_standard_font_dict(*font).into())?;
        }

        let (width, height) = renderer.page_size_pt();
        let media_box = MediaBox::from_dimensions(width, height);
        let resources: Vec<(String, u32)> = font_refs
            .iter()
            .map(|(name, _, font_ref)| (name.clone(), *font_ref))
            .collect();

        for ((page_ref, content_ref), content) in page_refs.into_iter().zip(contents) {
            let page = create_page(pages_ref, media_box, content_ref, &resources);
            pdf.write_object(page_ref, &page.into())?;
            pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()
    }
}
