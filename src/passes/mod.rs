// src/passes/mod.rs

//! Render pass identities and the catalog that binds requested output passes
//! to internally computed quantities.

mod catalog;
mod kinds;

pub use catalog::{ExternalPassEntry, MaskFlags, MaskParams, PassCatalog};
pub use kinds::{ExternalPassKind, InternalPassKind, TileShape, INTERNAL_PASS_COUNT};
