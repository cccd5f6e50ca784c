//! Canvas Model - Data model for the product strategy canvas
//!
//! This crate holds the user-facing canvas snapshot (section key -> text),
//! the static tab/section schema, and the derived views shared by every
//! export format.
//!
//! # Modules
//!
//! - `data`: Section content keyed by section identifier
//! - `schema`: Tab and section descriptors, validation, built-in schema
//! - `outline`: Filtered, ordered traversal consumed by the renderers
//! - `progress`: Completion counts and milestone detection

mod data;
mod error;
mod outline;
mod progress;
mod schema;

pub use data::*;
pub use error::*;
pub use outline::*;
pub use progress::*;
pub use schema::*;
