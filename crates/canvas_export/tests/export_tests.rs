//! End-to-end export tests: canvas data in, delivered artifacts out

use canvas_export::{
    CanvasExporter, DirectorySink, ExportFormat, ExportSettings, MemorySink,
};
use canvas_model::{product_strategy_canvas, CanvasData, CanvasSchema, CanvasSection, CanvasTab};
use chrono::{DateTime, FixedOffset, TimeZone};
use tempfile::TempDir;

fn at() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(-5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 11, 20, 9, 5, 0)
        .unwrap()
}

fn idea_schema() -> CanvasSchema {
    CanvasSchema::new(vec![
        CanvasTab::new("business", "Business").with_section(CanvasSection::new("idea", "Idea", ""))
    ])
}

fn uncompressed() -> CanvasExporter {
    CanvasExporter::new(ExportSettings {
        compress: false,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_text_export_single_idea() {
    let data = CanvasData::new().with("idea", "Build a tool");
    let artifact = uncompressed().render_text_artifact(&data, &idea_schema(), "My Project", &at());
    let text = String::from_utf8(artifact.bytes).unwrap();

    let separator = "─".repeat(60);
    for expected in [
        "My Project",
        "==========",
        separator.as_str(),
        "BUSINESS",
        "Idea",
        "----",
        "Build a tool",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in:\n{text}");
    }
    assert!(text.contains("Exported on: 11/20/2024 at 9:05:00 AM"));
}

#[test]
fn test_text_export_whitespace_idea() {
    let data = CanvasData::new().with("idea", "   ");
    let artifact = uncompressed().render_text_artifact(&data, &idea_schema(), "My Project", &at());
    let text = String::from_utf8(artifact.bytes).unwrap();

    assert!(text.contains("BUSINESS"));
    assert!(!text.contains("Idea"));
}

#[test]
fn test_long_content_spills_to_second_page_in_order() {
    let body: String = (1..=120).map(|i| format!("line {i:03}\n")).collect();
    let data = CanvasData::new().with("idea", body);
    let exporter = uncompressed();

    let (pages, summary) = exporter.render_pdf_pages(&data, &idea_schema(), "My Project", &at());
    assert!(pages.len() >= 2);
    assert_eq!(summary.body_lines, 120);

    let artifact = exporter
        .render_pdf_artifact(&data, &idea_schema(), "My Project", &at())
        .unwrap();
    let pdf = String::from_utf8_lossy(&artifact.bytes);
    assert!(pdf.contains(&format!("/Count {}", pages.len())));

    let positions: Vec<usize> = (1..=120)
        .map(|i| pdf.find(&format!("(line {i:03}) Tj")).expect("every line is drawn"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_repeated_exports_are_identical() {
    let data: CanvasData = product_strategy_canvas()
        .sections()
        .map(|s| (s.key.clone(), format!("Notes about {}", s.title)))
        .collect();
    let exporter = CanvasExporter::new(ExportSettings::default()).unwrap();
    let schema = product_strategy_canvas();

    let first = exporter.render_pdf_artifact(&data, &schema, "Plan", &at()).unwrap();
    let second = exporter.render_pdf_artifact(&data, &schema, "Plan", &at()).unwrap();
    assert_eq!(first, second);

    let text_a = exporter.render_text_artifact(&data, &schema, "Plan", &at());
    let text_b = exporter.render_text_artifact(&data, &schema, "Plan", &at());
    assert_eq!(text_a, text_b);
}

#[test]
fn test_exports_at_different_times_differ_only_in_timestamp() {
    let data: CanvasData = product_strategy_canvas()
        .sections()
        .map(|s| (s.key.clone(), format!("Notes about {}", s.title)))
        .collect();
    let schema = product_strategy_canvas();
    let exporter = uncompressed();
    let later = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2025, 6, 1, 18, 45, 30)
        .unwrap();

    let first = exporter.render_text_artifact(&data, &schema, "Plan", &at());
    let second = exporter.render_text_artifact(&data, &schema, "Plan", &later);
    assert_eq!(first.file_name, second.file_name);

    let first = String::from_utf8(first.bytes).unwrap();
    let second = String::from_utf8(second.bytes).unwrap();
    assert_ne!(first, second);
    assert!(second.contains("Exported on: 6/1/2025 at 6:45:30 PM"));

    let first_lines: Vec<&str> = first.lines().collect();
    let second_lines: Vec<&str> = second.lines().collect();
    assert_eq!(first_lines.len(), second_lines.len());
    for (a, b) in first_lines.iter().zip(&second_lines) {
        if a.starts_with("Exported on:") {
            assert!(b.starts_with("Exported on:"));
        } else {
            assert_eq!(a, b);
        }
    }

    let (first_pages, _) = exporter.render_pdf_pages(&data, &schema, "Plan", &at());
    let (second_pages, _) = exporter.render_pdf_pages(&data, &schema, "Plan", &later);
    let without_timestamp = |pages: &[canvas_layout::PageLayout]| -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| !t.starts_with("Exported on:"))
            .map(str::to_owned)
            .collect()
    };
    assert_eq!(without_timestamp(&first_pages), without_timestamp(&second_pages));
}

#[test]
fn test_directory_delivery_of_both_formats() {
    let dir = TempDir::new().unwrap();
    let exporter = CanvasExporter::new(ExportSettings::default()).unwrap();
    let data = CanvasData::new().with("problem", "Hard to align on strategy");
    let schema = product_strategy_canvas();

    for format in [ExportFormat::Text, ExportFormat::Pdf] {
        exporter
            .export(format, &data, &schema, "My Product #1!", DirectorySink::new(dir.path()))
            .unwrap();
    }

    let text = std::fs::read_to_string(dir.path().join("my_product__1__canvas.txt")).unwrap();
    assert!(text.contains("Hard to align on strategy"));
    let pdf = std::fs::read(dir.path().join("my_product__1__canvas.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    let leftovers = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .map(|e| e.file_name().to_string_lossy().ends_with(".part"))
                .unwrap_or(false)
        })
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn test_settings_file_drives_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.json");
    std::fs::write(
        &path,
        r#"{ "paper": "letter", "compress": false, "author": "Ada", "dateFormat": "%Y-%m-%d" }"#,
    )
    .unwrap();

    let settings = ExportSettings::load_or_default(&path).unwrap();
    let exporter = CanvasExporter::new(settings).unwrap();
    let mut sink = MemorySink::new();
    exporter
        .export(ExportFormat::Pdf, &CanvasData::new(), &idea_schema(), "Plan", &mut sink)
        .unwrap();

    let artifact = sink.last().unwrap();
    let pdf = String::from_utf8_lossy(&artifact.bytes);
    assert!(pdf.contains("/MediaBox [0 0 612 792]"));
    assert!(pdf.contains("/Author (Ada)"));
}
