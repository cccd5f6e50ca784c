//! Canvas content snapshot

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Section content keyed by section identifier.
///
/// Values may be empty or whitespace-only; such entries are treated the same
/// as a missing key by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasData {
    entries: HashMap<String, String>,
}

impl CanvasData {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from a flat JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the content of a section
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder variant of [`CanvasData::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw value for a key, blank or not
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Trimmed content for a key, or `None` when missing or blank
    pub fn content(&self, key: &str) -> Option<&str> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Whether the section has non-blank content
    pub fn is_filled(&self, key: &str) -> bool {
        self.content(key).is_some()
    }

    /// Number of stored entries (including blank ones)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CanvasData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_trims_value() {
        let data = CanvasData::new().with("idea", "  Build a tool \n");
        assert_eq!(data.content("idea"), Some("Build a tool"));
        assert_eq!(data.get("idea"), Some("  Build a tool \n"));
    }

    #[test]
    fn test_blank_and_missing_are_absent() {
        let data = CanvasData::new().with("idea", "   \t\n").with("empty", "");
        assert_eq!(data.content("idea"), None);
        assert_eq!(data.content("empty"), None);
        assert_eq!(data.content("missing"), None);
        assert!(!data.is_filled("idea"));
    }

    #[test]
    fn test_from_json() {
        let data = CanvasData::from_json(r#"{"idea": "Build a tool", "risks": ""}"#).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.is_filled("idea"));
        assert!(!data.is_filled("risks"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(CanvasData::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_from_iterator() {
        let data: CanvasData = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(data.get("b"), Some("2"));
    }
}
