//! Canvas Layout - Text wrapping and pagination for canvas exports
//!
//! This crate flows a [`canvas_model::CanvasOutline`] onto fixed-size pages.
//! It never touches a concrete document format: all drawing goes through the
//! [`RenderBackend`] trait, and all measuring through [`TextMetrics`], so the
//! algorithm can be driven by a fake backend with trivial metrics.

mod backend;
mod error;
mod geometry;
mod metrics;
mod paginator;
mod style;
mod wrap;

pub use backend::*;
pub use error::*;
pub use geometry::*;
pub use metrics::*;
pub use paginator::*;
pub use style::*;
pub use wrap::*;
