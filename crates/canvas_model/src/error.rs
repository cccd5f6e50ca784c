//! Error types for the canvas model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Duplicate tab id: {0}")]
    DuplicateTab(String),

    #[error("Duplicate section key: {0}")]
    DuplicateSection(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
