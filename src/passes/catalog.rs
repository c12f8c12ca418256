// src/passes/catalog.rs

//! The pass catalog: name lookups for external and internal pass kinds, and
//! the ordered list of external passes the current scene writes out.
//!
//! A catalog is configured once during scene setup and is read-only
//! afterwards, so it can be shared by reference across shading threads.

use std::collections::{BTreeMap, HashMap};

use bitflags::bitflags;
use log::debug;
use serde::{Deserialize, Serialize};

use super::kinds::{ExternalPassKind, InternalPassKind, TileShape};

bitflags! {
    /// Switches controlling how object/material index masks are produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MaskFlags: u8 {
        /// Mask everything except the selected index.
        const INVERT = 1 << 0;
        /// Emit only the mask, without the masked color.
        const ONLY   = 1 << 1;
    }
}

/// Index-masking parameters supplied by scene setup.
///
/// Stored as plain configuration; shading code reads them to decide how the
/// mask internal passes are populated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskParams {
    pub obj_index: f32,
    pub mat_index: f32,
    pub flags: MaskFlags,
}

/// One requested output pass bound to the internal quantity that feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalPassEntry {
    pub external: ExternalPassKind,
    pub internal: InternalPassKind,
    pub tile_shape: TileShape,
    pub enabled: bool,
}

impl ExternalPassEntry {
    pub fn new(external: ExternalPassKind, internal: InternalPassKind) -> Self {
        ExternalPassEntry {
            external,
            internal,
            tile_shape: external.tile_shape(),
            enabled: external != ExternalPassKind::Disabled,
        }
    }
}

/// Name tables plus the ordered list of active external passes.
#[derive(Debug, Clone)]
pub struct PassCatalog {
    external_by_name: HashMap<&'static str, ExternalPassKind>,
    external_names: BTreeMap<ExternalPassKind, &'static str>,
    internal_by_name: HashMap<&'static str, InternalPassKind>,
    internal_names: BTreeMap<InternalPassKind, &'static str>,
    entries: Vec<ExternalPassEntry>,
    mask: MaskParams,
}

impl Default for PassCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PassCatalog {
    /// Builds the name tables and the default Combined → combined entry.
    pub fn new() -> Self {
        let mut external_by_name = HashMap::with_capacity(ExternalPassKind::ALL.len());
        let mut external_names = BTreeMap::new();
        for kind in ExternalPassKind::ALL {
            if let Some(name) = kind.name() {
                external_by_name.insert(name, kind);
                external_names.insert(kind, name);
            }
        }

        let mut internal_by_name = HashMap::with_capacity(InternalPassKind::ALL.len());
        let mut internal_names = BTreeMap::new();
        for kind in InternalPassKind::ALL {
            if let Some(name) = kind.name() {
                internal_by_name.insert(name, kind);
                internal_names.insert(kind, name);
            }
        }

        let mut entries = Vec::with_capacity(ExternalPassKind::ALL.len());
        entries.push(ExternalPassEntry::new(
            ExternalPassKind::Combined,
            InternalPassKind::Combined,
        ));

        PassCatalog {
            external_by_name,
            external_names,
            internal_by_name,
            internal_names,
            entries,
            mask: MaskParams::default(),
        }
    }

    /// Resolves an external pass name; unknown names yield `Disabled`.
    pub fn lookup_external(&self, name: &str) -> ExternalPassKind {
        self.external_by_name
            .get(name)
            .copied()
            .unwrap_or(ExternalPassKind::Disabled)
    }

    /// Resolves an internal pass name; unknown names yield `Disabled`.
    pub fn lookup_internal(&self, name: &str) -> InternalPassKind {
        self.internal_by_name
            .get(name)
            .copied()
            .unwrap_or(InternalPassKind::Disabled)
    }

    pub fn external_name(&self, kind: ExternalPassKind) -> Option<&'static str> {
        self.external_names.get(&kind).copied()
    }

    pub fn internal_name(&self, kind: InternalPassKind) -> Option<&'static str> {
        self.internal_names.get(&kind).copied()
    }

    /// Appends an external pass bound to an internal one.
    ///
    /// The request is dropped without error when either name is unknown, when
    /// it names Combined (always present), or when the external pass is already
    /// bound. Returns whether an entry was added.
    pub fn add_external_pass(&mut self, external_name: &str, internal_name: &str) -> bool {
        let external = self.lookup_external(external_name);
        let internal = self.lookup_internal(internal_name);

        if external == ExternalPassKind::Disabled
            || external == ExternalPassKind::Combined
            || internal == InternalPassKind::Disabled
        {
            debug!(
                "Ignoring pass binding '{}' -> '{}' (resolved to {:?} -> {:?})",
                external_name, internal_name, external, internal
            );
            return false;
        }
        if self.entries.iter().any(|e| e.external == external) {
            debug!(
                "External pass '{}' is already bound; ignoring '{}'",
                external_name, internal_name
            );
            return false;
        }

        let entry = ExternalPassEntry::new(external, internal);
        debug!(
            "Added external pass {:?} -> {:?} ({:?})",
            entry.external, entry.internal, entry.tile_shape
        );
        self.entries.push(entry);
        true
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> Option<&ExternalPassEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ExternalPassEntry> {
        self.entries.iter()
    }

    /// Distinct internal kinds referenced by enabled entries, in entry order.
    pub fn internal_kinds(&self) -> Vec<InternalPassKind> {
        let mut kinds: Vec<InternalPassKind> = Vec::with_capacity(self.entries.len());
        for entry in self.entries.iter().filter(|e| e.enabled) {
            if !kinds.contains(&entry.internal) {
                kinds.push(entry.internal);
            }
        }
        kinds
    }

    /// Position of the entry for `external`, if bound.
    pub fn position(&self, external: ExternalPassKind) -> Option<usize> {
        self.entries.iter().position(|e| e.external == external)
    }

    pub fn mask_params(&self) -> &MaskParams {
        &self.mask
    }

    pub fn set_mask_params(&mut self, mask: MaskParams) {
        self.mask = mask;
    }
}
