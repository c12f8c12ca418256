// src/accum/mod.rs

//! The per-sample pass accumulator.
//!
//! A `PassAccumulator` stores one `Rgba` per internal pass slot that has been
//! allocated, plus a parallel enabled bit. Slots are allocated contiguously up
//! to the highest slot ever enabled (the watermark), so lookups are plain
//! indexing. Slots below the watermark that were never enabled exist, hold
//! their default color, and ignore every conditional write.
//!
//! An accumulator is owned by a single shading thread for the lifetime of one
//! sample. Per-pixel totals are separate accumulators combined with
//! [`PassAccumulator::merge_add`].

use std::ops::MulAssign;

use log::{trace, warn};

use crate::color::{Rgb, Rgba};
use crate::passes::{InternalPassKind, PassCatalog, INTERNAL_PASS_COUNT};

/// Default contents of a freshly allocated slot.
///
/// Opaque black, except for the shadow and index-mask passes, which start
/// transparent so they can be used as alpha masks as is.
pub fn default_color(kind: InternalPassKind) -> Rgba {
    if kind.is_mask() {
        Rgba::TRANSPARENT_BLACK
    } else {
        Rgba::OPAQUE_BLACK
    }
}

fn default_for_slot(slot: usize) -> Rgba {
    InternalPassKind::from_slot(slot).map_or(Rgba::OPAQUE_BLACK, default_color)
}

/// Sparse, lazily grown set of internal pass colors for one shading sample.
#[derive(Debug, Clone)]
pub struct PassAccumulator<'a> {
    colors: Vec<Rgba>,
    enabled: Vec<bool>,
    catalog: &'a PassCatalog,
}

impl<'a> PassAccumulator<'a> {
    /// Creates an accumulator with only the Combined slot enabled.
    pub fn new(catalog: &'a PassCatalog) -> Self {
        let mut accumulator = PassAccumulator {
            colors: Vec::with_capacity(INTERNAL_PASS_COUNT),
            enabled: Vec::with_capacity(INTERNAL_PASS_COUNT),
            catalog,
        };
        accumulator.enable(InternalPassKind::Combined);
        accumulator
    }

    /// Creates an accumulator with every internal kind the catalog references
    /// already enabled.
    pub fn for_catalog(catalog: &'a PassCatalog) -> Self {
        let mut accumulator = Self::new(catalog);
        accumulator.enable_catalog_passes();
        accumulator
    }

    /// Enables every internal kind referenced by the catalog's entries.
    pub fn enable_catalog_passes(&mut self) {
        for kind in self.catalog.internal_kinds() {
            self.enable(kind);
        }
    }

    pub fn catalog(&self) -> &'a PassCatalog {
        self.catalog
    }

    /// Highest slot ever enabled. Always at least 0 (Combined).
    pub fn highest_used(&self) -> usize {
        self.colors.len() - 1
    }

    /// Enables `kind`, growing the slot array up to it if needed.
    ///
    /// Slots allocated on the way are default-initialized but stay disabled.
    /// `Disabled` and already enabled kinds are ignored.
    pub fn enable(&mut self, kind: InternalPassKind) {
        let Some(slot) = kind.slot() else {
            return;
        };
        if slot >= self.colors.len() {
            let first_new = self.colors.len();
            for idx in first_new..=slot {
                self.colors.push(default_for_slot(idx));
                self.enabled.push(false);
            }
            trace!("Accumulator grew to slot {} ({:?})", slot, kind);
        }
        self.enabled[slot] = true;
    }

    /// Whether conditional writes to `kind` take effect.
    pub fn is_enabled(&self, kind: InternalPassKind) -> bool {
        kind.slot()
            .and_then(|slot| self.enabled.get(slot).copied())
            .unwrap_or(false)
    }

    /// The value stored for `kind`.
    ///
    /// Disabled but allocated slots return whatever they last held. Slots that
    /// were never allocated, and `Disabled`, return the default color.
    pub fn color(&self, kind: InternalPassKind) -> Rgba {
        kind.slot()
            .and_then(|slot| self.colors.get(slot).copied())
            .unwrap_or_else(|| default_color(kind))
    }

    /// Direct access to an allocated slot, enabled or not.
    pub fn color_mut(&mut self, kind: InternalPassKind) -> Option<&mut Rgba> {
        kind.slot().and_then(move |slot| self.colors.get_mut(slot))
    }

    fn writable_slot(&self, kind: InternalPassKind, gate: bool) -> Option<usize> {
        if !gate {
            return None;
        }
        let slot = kind.slot()?;
        if self.enabled.get(slot).copied().unwrap_or(false) {
            Some(slot)
        } else {
            None
        }
    }

    /// Overwrites `kind` with `value` when `gate` holds and the kind is
    /// enabled. Always returns `value`.
    pub fn probe_set(&mut self, kind: InternalPassKind, value: Rgba, gate: bool) -> Rgba {
        if let Some(slot) = self.writable_slot(kind, gate) {
            self.colors[slot] = value;
        }
        value
    }

    /// Adds `value` into `kind` under the same conditions as
    /// [`probe_set`](Self::probe_set). Always returns `value`.
    pub fn probe_add(&mut self, kind: InternalPassKind, value: Rgba, gate: bool) -> Rgba {
        if let Some(slot) = self.writable_slot(kind, gate) {
            self.colors[slot] += value;
        }
        value
    }

    /// Multiplies `kind` by `value` under the same conditions as
    /// [`probe_set`](Self::probe_set). Always returns `value`.
    pub fn probe_mult(&mut self, kind: InternalPassKind, value: Rgba, gate: bool) -> Rgba {
        if let Some(slot) = self.writable_slot(kind, gate) {
            self.colors[slot] *= value;
        }
        value
    }

    /// Slot of `kind` when it is writable here and enabled in `other`.
    fn peer_slot(
        &self,
        kind: InternalPassKind,
        other: &PassAccumulator<'_>,
        gate: bool,
    ) -> Option<usize> {
        self.writable_slot(kind, gate)
            .filter(|_| other.is_enabled(kind))
    }

    /// Copies `other`'s value for `kind` into self.
    ///
    /// Requires `gate`, and `kind` enabled on both sides. Returns the copied
    /// value, or `Rgba::ZERO` when nothing was copied.
    pub fn probe_set_from(
        &mut self,
        kind: InternalPassKind,
        other: &PassAccumulator<'_>,
        gate: bool,
    ) -> Rgba {
        match self.peer_slot(kind, other, gate) {
            Some(slot) => {
                let value = other.colors[slot];
                self.colors[slot] = value;
                value
            }
            None => Rgba::ZERO,
        }
    }

    /// Adds `other`'s value for `kind` into self. See
    /// [`probe_set_from`](Self::probe_set_from) for the conditions.
    pub fn probe_add_from(
        &mut self,
        kind: InternalPassKind,
        other: &PassAccumulator<'_>,
        gate: bool,
    ) -> Rgba {
        match self.peer_slot(kind, other, gate) {
            Some(slot) => {
                let value = other.colors[slot];
                self.colors[slot] += value;
                value
            }
            None => Rgba::ZERO,
        }
    }

    /// Multiplies self's value for `kind` by `other`'s. See
    /// [`probe_set_from`](Self::probe_set_from) for the conditions.
    pub fn probe_mult_from(
        &mut self,
        kind: InternalPassKind,
        other: &PassAccumulator<'_>,
        gate: bool,
    ) -> Rgba {
        match self.peer_slot(kind, other, gate) {
            Some(slot) => {
                let value = other.colors[slot];
                self.colors[slot] *= value;
                value
            }
            None => Rgba::ZERO,
        }
    }

    /// Restores every allocated slot to its default color. Enabled bits are
    /// left as they are.
    pub fn reset_all(&mut self) {
        for (slot, color) in self.colors.iter_mut().enumerate() {
            *color = default_for_slot(slot);
        }
    }

    /// Multiplies every allocated slot, alpha included, by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for color in &mut self.colors {
            *color *= factor;
        }
    }

    /// Multiplies the chromatic channels of every allocated slot by `factor`.
    pub fn scale_rgb(&mut self, factor: Rgb) {
        for color in &mut self.colors {
            *color *= factor;
        }
    }

    /// Multiplies every allocated slot by `factor` channel-wise.
    pub fn scale_rgba(&mut self, factor: Rgba) {
        for color in &mut self.colors {
            *color *= factor;
        }
    }

    /// Adds `other`'s allocated slots into the matching slots of self.
    ///
    /// Both sides are expected to come from the same catalog and so share a
    /// watermark. When they do not, only the slots both have allocated are
    /// merged.
    pub fn merge_add(&mut self, other: &PassAccumulator<'_>) {
        if self.colors.len() != other.colors.len() {
            warn!(
                "Merging accumulators with different watermarks ({} vs {}); merging the common range only",
                self.highest_used(),
                other.highest_used()
            );
        }
        for (dst, src) in self.colors.iter_mut().zip(&other.colors) {
            *dst += *src;
        }
    }

    /// Enabled kinds in slot order.
    pub fn enabled_kinds(&self) -> impl Iterator<Item = InternalPassKind> + '_ {
        self.enabled
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .filter_map(|(slot, _)| InternalPassKind::from_slot(slot))
    }
}

impl MulAssign<f32> for PassAccumulator<'_> {
    fn mul_assign(&mut self, factor: f32) {
        self.scale(factor);
    }
}

impl MulAssign<Rgb> for PassAccumulator<'_> {
    fn mul_assign(&mut self, factor: Rgb) {
        self.scale_rgb(factor);
    }
}

impl MulAssign<Rgba> for PassAccumulator<'_> {
    fn mul_assign(&mut self, factor: Rgba) {
        self.scale_rgba(factor);
    }
}
