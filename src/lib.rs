// src/lib.rs

//! Multi-channel render pass accumulation.
//!
//! A renderer computes many quantities per shading sample (depth, diffuse,
//! glossy, masks, ...). [`passes::PassCatalog`] records which of them the host
//! wants written and under which external name, [`accum::PassAccumulator`]
//! collects them per sample, and [`film`] turns accumulated samples into
//! encoded output tiles.

pub mod accum;
pub mod color;
pub mod config;
pub mod film;
pub mod passes;

pub use accum::PassAccumulator;
pub use color::{ColorSpace, Rgb, Rgba};
pub use config::Config;
pub use film::{OutputSpace, PassFilm, PassTile};
pub use passes::{ExternalPassKind, InternalPassKind, PassCatalog};
