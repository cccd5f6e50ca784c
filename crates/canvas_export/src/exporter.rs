//! Canvas exporter
//!
//! Both formats walk the same [`CanvasOutline`], so they agree on tab and
//! section order and on which sections are blank. Rendering takes the export
//! time as an argument; the `export_*` entry points stamp the local time and
//! hand the artifact to a sink.

use crate::pdf::{export_pdf_bytes, StandardFontMetrics};
use crate::{
    artifact_file_name, render_text, ArtifactSink, ExportArtifact, ExportFormat, ExportSettings,
    Result,
};
use canvas_layout::{CanvasPaginator, PageLayout, PageRecorder, PaginationSummary};
use canvas_model::{CanvasData, CanvasOutline, CanvasSchema};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Renders canvases to text and PDF artifacts
#[derive(Debug, Clone)]
pub struct CanvasExporter {
    settings: ExportSettings,
    paginator: CanvasPaginator,
}

impl CanvasExporter {
    /// Create an exporter, rejecting settings whose page setup cannot paginate
    pub fn new(settings: ExportSettings) -> Result<Self> {
        let paginator = CanvasPaginator::new(settings.layout_config())?;
        Ok(Self {
            settings,
            paginator,
        })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Render the plain-text artifact for a canvas
    pub fn render_text_artifact<Tz>(
        &self,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        at: &DateTime<Tz>,
    ) -> ExportArtifact
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let outline = CanvasOutline::build(data, schema);
        let text = render_text(&outline, title, &self.settings.timestamp_line(at));

        let artifact = ExportArtifact::new(
            artifact_file_name(title, ExportFormat::Text),
            ExportFormat::Text,
            text.into_bytes(),
        );
        tracing::info!(
            "Rendered {} ({} bytes, {} sections)",
            artifact.file_name,
            artifact.len(),
            outline.section_count()
        );
        artifact
    }

    /// Lay a canvas out onto pages without encoding them
    pub fn render_pdf_pages<Tz>(
        &self,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        at: &DateTime<Tz>,
    ) -> (Vec<PageLayout>, PaginationSummary)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let outline = CanvasOutline::build(data, schema);
        let metrics = StandardFontMetrics::new(self.settings.font());
        let mut recorder = PageRecorder::new(metrics, self.paginator.config().geometry);

        let summary = self.paginator.paginate(
            &outline,
            title,
            &self.settings.timestamp_line(at),
            &mut recorder,
        );
        (recorder.into_pages(), summary)
    }

    /// Render the PDF artifact for a canvas
    pub fn render_pdf_artifact<Tz>(
        &self,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        at: &DateTime<Tz>,
    ) -> Result<ExportArtifact>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (pages, summary) = self.render_pdf_pages(data, schema, title, at);
        let options = self
            .settings
            .pdf_options(title)
            .with_creation_date(at.fixed_offset());

        let bytes = export_pdf_bytes(
            &pages,
            self.paginator.config().geometry,
            self.settings.font(),
            options,
        )?;

        let artifact = ExportArtifact::new(
            artifact_file_name(title, ExportFormat::Pdf),
            ExportFormat::Pdf,
            bytes,
        );
        tracing::info!(
            "Rendered {} ({} bytes, {} pages, {} body lines)",
            artifact.file_name,
            artifact.len(),
            summary.pages,
            summary.body_lines
        );
        Ok(artifact)
    }

    /// Export as text, stamped with the current local time
    pub fn export_text<S: ArtifactSink>(
        &self,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        mut sink: S,
    ) -> Result<()> {
        let artifact = self.render_text_artifact(data, schema, title, &Local::now());
        sink.deliver(&artifact)
    }

    /// Export as PDF, stamped with the current local time
    pub fn export_pdf<S: ArtifactSink>(
        &self,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        mut sink: S,
    ) -> Result<()> {
        let artifact = self.render_pdf_artifact(data, schema, title, &Local::now())?;
        sink.deliver(&artifact)
    }

    /// Export in `format`, stamped with the current local time
    pub fn export<S: ArtifactSink>(
        &self,
        format: ExportFormat,
        data: &CanvasData,
        schema: &CanvasSchema,
        title: &str,
        sink: S,
    ) -> Result<()> {
        match format {
            ExportFormat::Text => self.export_text(data, schema, title, sink),
            ExportFormat::Pdf => self.export_pdf(data, schema, title, sink),
        }
    }
}
