// src/film/mod.rs

//! The output side of the pass pipeline.
//!
//! A [`PassFilm`] keeps one weighted buffer per external pass in the catalog.
//! Samples are splatted into it from accumulators, and
//! [`develop`](PassFilm::develop) turns the buffers into [`PassTile`]s encoded
//! for an [`OutputSpace`]. [`composite_pixel`] is the unfiltered path that
//! writes one accumulator straight into a set of tiles.

use log::{debug, trace};

use crate::accum::PassAccumulator;
use crate::color::{ColorSpace, Rgba};
use crate::passes::{ExternalPassEntry, ExternalPassKind, PassCatalog, TileShape};

mod buffer;
mod pixel;

pub use buffer::{Buffer2D, GrayPixel, WeightedPixel};
pub use pixel::{PackedPixel, Rgb565, Rgb888, Rgba8888};

/// Gammas this close to 1 are treated as linear.
const GAMMA_EPSILON: f32 = 0.001;

/// How linear pass values are encoded when written out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSpace {
    pub color_space: ColorSpace,
    pub gamma: f32,
    pub premultiply: bool,
}

impl Default for OutputSpace {
    fn default() -> Self {
        OutputSpace {
            color_space: ColorSpace::LinearRgb,
            gamma: 1.0,
            premultiply: false,
        }
    }
}

impl OutputSpace {
    /// Builds an output space, degrading manual gamma to plain linear RGB when
    /// the gamma is non-positive or indistinguishable from 1.
    pub fn resolve(color_space: ColorSpace, gamma: f32, premultiply: bool) -> Self {
        let (color_space, gamma) = match color_space {
            ColorSpace::RawManualGamma if gamma <= 0.0 || (1.0 - gamma).abs() <= GAMMA_EPSILON => {
                debug!("Manual gamma {} is degenerate, writing linear RGB", gamma);
                (ColorSpace::LinearRgb, 1.0)
            }
            other => (other, gamma),
        };
        OutputSpace {
            color_space,
            gamma,
            premultiply,
        }
    }

    /// Encodes one linear value for output.
    ///
    /// Non-finite values become opaque black. Negative chromatic channels are
    /// clamped to zero before the space conversion.
    pub fn encode(&self, color: Rgba) -> Rgba {
        if color.is_nan() || color.is_inf() {
            trace!("Replacing non-finite output value {:?}", color);
            return Rgba::OPAQUE_BLACK;
        }
        let mut rgb = color.rgb();
        rgb.clamp0();
        let mut out = Rgba::from_rgb(rgb.to_space(self.color_space, self.gamma), color.a);
        if self.premultiply {
            out.premultiply();
        }
        out
    }
}

/// One external pass serialized with the channel count of its tile shape.
///
/// Values are interleaved row by row. `Gray1` tiles keep only the red channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PassTile {
    pub external: ExternalPassKind,
    pub shape: TileShape,
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl PassTile {
    pub fn new(external: ExternalPassKind, shape: TileShape, width: usize, height: usize) -> Self {
        PassTile {
            external,
            shape,
            width,
            height,
            data: vec![0.0; width * height * shape.channels()],
        }
    }

    fn for_entry(entry: &ExternalPassEntry, width: usize, height: usize) -> Self {
        Self::new(entry.external, entry.tile_shape, width, height)
    }

    /// One tile per catalog entry, in entry order.
    pub fn for_catalog(catalog: &PassCatalog, width: usize, height: usize) -> Vec<PassTile> {
        catalog
            .entries()
            .map(|entry| Self::for_entry(entry, width, height))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * self.shape.channels())
    }

    /// Stores the channels of `color` this tile keeps. Returns false when
    /// `(x, y)` is outside the tile.
    pub fn write(&mut self, x: usize, y: usize, color: Rgba) -> bool {
        let Some(at) = self.offset(x, y) else {
            return false;
        };
        let channels = self.shape.channels();
        let src = color.to_f32();
        self.data[at..at + channels].copy_from_slice(&src[..channels]);
        true
    }

    /// Reads back a pixel. Missing channels read as the red value (gray) and
    /// an alpha of 1.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let at = self.offset(x, y)?;
        let px = &self.data[at..at + self.shape.channels()];
        Some(match self.shape {
            TileShape::Gray1 => Rgba::new(px[0], px[0], px[0], 1.0),
            TileShape::Rgb3 => Rgba::new(px[0], px[1], px[2], 1.0),
            TileShape::Rgba4 => Rgba::new(px[0], px[1], px[2], px[3]),
        })
    }

    /// Quantizes the tile into a packed pixel buffer.
    pub fn to_packed<P: PackedPixel>(&self) -> Buffer2D<P> {
        let mut out = Buffer2D::<P>::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if let (Some(color), Some(cell)) = (self.pixel(x, y), out.get_mut(x, y)) {
                    cell.set_color(color);
                }
            }
        }
        out
    }
}

/// Weighted storage for one external pass.
///
/// Single-channel passes only keep the red channel, so they accumulate into a
/// [`GrayPixel`] grid instead of a full [`WeightedPixel`] one.
#[derive(Debug, Clone, PartialEq)]
pub enum PassBuffer {
    Color(Buffer2D<WeightedPixel>),
    Gray(Buffer2D<GrayPixel>),
}

impl PassBuffer {
    pub fn new(shape: TileShape, width: usize, height: usize) -> Self {
        match shape {
            TileShape::Gray1 => PassBuffer::Gray(Buffer2D::new(width, height)),
            TileShape::Rgb3 | TileShape::Rgba4 => PassBuffer::Color(Buffer2D::new(width, height)),
        }
    }

    /// Adds a weighted sample. Returns false when `(x, y)` is out of range.
    pub fn add(&mut self, x: usize, y: usize, color: Rgba, weight: f32) -> bool {
        let added = match self {
            PassBuffer::Color(buf) => buf.get_mut(x, y).map(|px| px.add(color, weight)),
            PassBuffer::Gray(buf) => buf.get_mut(x, y).map(|px| px.add(color.r, weight)),
        };
        added.is_some()
    }

    /// Total filter weight accumulated at `(x, y)`.
    pub fn weight(&self, x: usize, y: usize) -> Option<f32> {
        match self {
            PassBuffer::Color(buf) => buf.get(x, y).map(|px| px.weight),
            PassBuffer::Gray(buf) => buf.get(x, y).map(|px| px.weight),
        }
    }

    /// Weighted average at `(x, y)`. Gray values come back as an opaque gray.
    pub fn normalized(&self, x: usize, y: usize) -> Option<Rgba> {
        match self {
            PassBuffer::Color(buf) => buf.get(x, y).map(WeightedPixel::normalized),
            PassBuffer::Gray(buf) => buf.get(x, y).map(|px| {
                let v = px.normalized();
                Rgba::new(v, v, v, 1.0)
            }),
        }
    }

    pub fn clear(&mut self) {
        match self {
            PassBuffer::Color(buf) => buf.clear(),
            PassBuffer::Gray(buf) => buf.clear(),
        }
    }
}

/// Per-pass weighted image buffers for a `width × height` frame.
#[derive(Debug, Clone)]
pub struct PassFilm {
    width: usize,
    height: usize,
    entries: Vec<ExternalPassEntry>,
    buffers: Vec<PassBuffer>,
}

impl PassFilm {
    pub fn new(catalog: &PassCatalog, width: usize, height: usize) -> Self {
        let entries: Vec<ExternalPassEntry> = catalog.entries().copied().collect();
        let buffers = entries
            .iter()
            .map(|entry| PassBuffer::new(entry.tile_shape, width, height))
            .collect();
        debug!(
            "Created {}x{} film with {} pass buffers",
            width,
            height,
            entries.len()
        );
        PassFilm {
            width,
            height,
            entries,
            buffers,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pass buffers, one per catalog entry.
    pub fn pass_count(&self) -> usize {
        self.buffers.len()
    }

    /// The weighted buffer for the entry at `index`.
    pub fn buffer(&self, index: usize) -> Option<&PassBuffer> {
        self.buffers.get(index)
    }

    /// Splats every enabled pass of `accumulator` into pixel `(x, y)`.
    pub fn add_sample(&mut self, x: usize, y: usize, accumulator: &PassAccumulator<'_>, weight: f32) {
        for (entry, buffer) in self.entries.iter().zip(&mut self.buffers) {
            if !entry.enabled {
                continue;
            }
            if !buffer.add(x, y, accumulator.color(entry.internal), weight) {
                trace!("Sample at ({}, {}) is outside the film", x, y);
                return;
            }
        }
    }

    /// Clears every buffer back to zero weight.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }

    /// Normalizes and encodes every pass into a tile.
    pub fn develop(&self, space: &OutputSpace) -> Vec<PassTile> {
        self.entries
            .iter()
            .zip(&self.buffers)
            .map(|(entry, buffer)| {
                let mut tile = PassTile::for_entry(entry, self.width, self.height);
                for y in 0..self.height {
                    for x in 0..self.width {
                        if let Some(color) = buffer.normalized(x, y) {
                            tile.write(x, y, space.encode(color));
                        }
                    }
                }
                tile
            })
            .collect()
    }
}

/// Writes one accumulator's passes straight into `tiles` at `(x, y)`.
///
/// `tiles` is expected in catalog entry order, as built by
/// [`PassTile::for_catalog`]; a tile whose pass does not match its entry is
/// skipped.
pub fn composite_pixel(
    catalog: &PassCatalog,
    accumulator: &PassAccumulator<'_>,
    space: &OutputSpace,
    tiles: &mut [PassTile],
    x: usize,
    y: usize,
) {
    for (entry, tile) in catalog.entries().zip(tiles.iter_mut()) {
        if !entry.enabled || tile.external != entry.external {
            continue;
        }
        tile.write(x, y, space.encode(accumulator.color(entry.internal)));
    }
}
