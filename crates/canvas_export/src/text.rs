//! Plain-text canvas rendering
//!
//! ```text
//! My Project
//! ==========
//!
//! Exported on: 3/5/2024 at 2:30:09 PM
//!
//! ────────────────────────────────────────────────────────────
//! BUSINESS
//! ────────────────────────────────────────────────────────────
//!
//! Problem
//! -------
//! Teams lose track of strategy decisions.
//!
//! ```

use canvas_model::CanvasOutline;

/// Width of the tab separator, in characters
pub const SEPARATOR_WIDTH: usize = 60;

const SEPARATOR_CHAR: char = '─';

/// Render a canvas outline as plain text.
///
/// `timestamp_line` is written verbatim below the title; every tab prints
/// its header block even when none of its sections have content.
pub fn render_text(outline: &CanvasOutline<'_>, title: &str, timestamp_line: &str) -> String {
    let separator: String = std::iter::repeat(SEPARATOR_CHAR)
        .take(SEPARATOR_WIDTH)
        .collect();
    let mut out = String::new();

    push_underlined(&mut out, title, '=');
    out.push('\n');
    out.push_str(timestamp_line);
    out.push_str("\n\n");

    for tab in &outline.tabs {
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&tab.title.to_uppercase());
        out.push('\n');
        out.push_str(&separator);
        out.push_str("\n\n");

        for section in &tab.sections {
            push_underlined(&mut out, section.title, '-');
            out.push_str(section.content);
            out.push_str("\n\n");
        }
    }

    out
}

fn push_underlined(out: &mut String, heading: &str, underline: char) {
    out.push_str(heading);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(heading.chars().count()));
    out.push('\n');
}
