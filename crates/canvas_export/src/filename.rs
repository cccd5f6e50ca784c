//! Artifact file naming

use crate::ExportFormat;

/// Replace every character that is not an ASCII letter or digit with `_`,
/// then lower-case.
///
/// Each input character maps to exactly one output character, so the
/// result has the same character count as `title`.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `<sanitized title>_canvas.<ext>`
pub fn artifact_file_name(title: &str, format: ExportFormat) -> String {
    format!("{}_canvas.{}", sanitize_filename(title), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_punctuation() {
        assert_eq!(sanitize_filename("My Product #1!"), "my_product__1_");
    }

    #[test]
    fn test_sanitize_empty_title() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(artifact_file_name("", ExportFormat::Text), "_canvas.txt");
    }

    #[test]
    fn test_non_ascii_letters_are_replaced() {
        assert_eq!(sanitize_filename("Café Ünïcode"), "caf___n_code");
        assert_eq!(sanitize_filename("日本"), "__");
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(
            artifact_file_name("Go-to-Market Plan", ExportFormat::Pdf),
            "go_to_market_plan_canvas.pdf"
        );
        assert_eq!(
            artifact_file_name("Roadmap", ExportFormat::Text),
            "roadmap_canvas.txt"
        );
    }

    proptest! {
        #[test]
        fn prop_sanitized_charset_and_length(title in any::<String>()) {
            let sanitized = sanitize_filename(&title);
            prop_assert!(sanitized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert_eq!(sanitized.chars().count(), title.chars().count());
        }

        #[test]
        fn prop_sanitize_is_idempotent(title in "\\PC{0,40}") {
            let once = sanitize_filename(&title);
            prop_assert_eq!(sanitize_filename(&once), once.clone());
        }
    }
}
