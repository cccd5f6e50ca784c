//! Canvas Export - Text and PDF exports of product strategy canvases
//!
//! This crate provides:
//! - Plain-text rendering of a canvas outline
//! - PDF encoding of paginated canvas pages (standard fonts, no embedding)
//! - Artifact naming from the project title
//! - Delivery to a directory, a browser download, or memory
//! - JSON-backed export settings

mod artifact;
mod error;
mod exporter;
mod filename;
pub mod pdf;
mod settings;
mod sink;
mod text;

pub use artifact::*;
pub use error::*;
pub use exporter::*;
pub use filename::*;
pub use settings::*;
pub use sink::*;
pub use text::*;
