// src/config.rs

//! Defines the configuration structures for scene-level pass setup.
//!
//! A configuration names which external passes the host wants written, the
//! internal quantity feeding each of them, the index-mask parameters, and how
//! the primary (and optional secondary) output is encoded. It is read from
//! JSON; every field has a default so partial files are accepted.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::color::ColorSpace;
use crate::film::OutputSpace;
use crate::passes::{ExternalPassKind, MaskFlags, MaskParams, PassCatalog};

/// Prefix accepted on binding keys, as in `"pass_Depth": "z-depth-norm"`.
const BINDING_PREFIX: &str = "pass_";
/// Binding value that explicitly leaves an external pass off.
const DISABLED_BINDING: &str = "disabled";

// --- Top-Level Configuration Structure ---

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// External pass bindings and mask parameters.
    pub passes: PassConfig,
    /// Encoding of the primary output.
    pub output: OutputConfig,
    /// Encoding of an optional secondary output.
    pub output2: Option<OutputConfig>,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse render pass configuration")
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        info!(
            "Loaded configuration from {} ({} pass bindings)",
            path.display(),
            config.passes.bindings.len()
        );
        Ok(config)
    }
}

// --- Pass Configuration ---

/// Which external passes to produce and what feeds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PassConfig {
    /// External pass name (optionally `pass_`-prefixed) to internal pass name.
    pub bindings: BTreeMap<String, String>,
    /// Object index selected by the object index mask passes.
    pub mask_obj_index: i32,
    /// Material index selected by the material index mask passes.
    pub mask_mat_index: i32,
    /// Mask everything except the selected index.
    pub mask_invert: bool,
    /// Write the mask alone instead of the masked color.
    pub mask_only: bool,
}

impl PassConfig {
    /// Looks up the binding for an external pass name, with or without the
    /// `pass_` prefix. The unprefixed key wins when both are present.
    fn binding_for(&self, external_name: &str) -> Option<&str> {
        self.bindings
            .get(external_name)
            .or_else(|| {
                self.bindings
                    .get(&format!("{}{}", BINDING_PREFIX, external_name))
            })
            .map(String::as_str)
    }

    pub fn mask_params(&self) -> MaskParams {
        let mut flags = MaskFlags::empty();
        flags.set(MaskFlags::INVERT, self.mask_invert);
        flags.set(MaskFlags::ONLY, self.mask_only);
        MaskParams {
            obj_index: self.mask_obj_index as f32,
            mat_index: self.mask_mat_index as f32,
            flags,
        }
    }

    /// Builds the pass catalog described by this configuration.
    ///
    /// Bindings are applied in external pass order, so the resulting entry
    /// order does not depend on the order of keys in the file. Bindings to
    /// unknown names are dropped with a warning.
    pub fn build_catalog(&self) -> PassCatalog {
        let mut catalog = PassCatalog::new();

        for kind in ExternalPassKind::ALL {
            let Some(external_name) = kind.name() else {
                continue;
            };
            let Some(internal_name) = self.binding_for(external_name) else {
                continue;
            };
            if internal_name.is_empty() || internal_name == DISABLED_BINDING {
                continue;
            }
            if kind == ExternalPassKind::Combined {
                debug!("Combined is always bound to 'combined'; ignoring '{}'", internal_name);
                continue;
            }
            if !catalog.add_external_pass(external_name, internal_name) {
                warn!(
                    "Dropping pass binding {} -> '{}': unknown internal pass",
                    external_name, internal_name
                );
            }
        }

        for key in self.bindings.keys() {
            let name = key.strip_prefix(BINDING_PREFIX).unwrap_or(key);
            if catalog.lookup_external(name) == ExternalPassKind::Disabled {
                warn!("Ignoring binding for unknown external pass '{}'", key);
            }
        }

        catalog.set_mask_params(self.mask_params());
        debug!("Built pass catalog with {} entries", catalog.count());
        catalog
    }
}

// --- Output Configuration ---

/// How one output encodes linear pass values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// One of "sRGB", "XYZ", "LinearRGB" or "Raw_Manual_Gamma".
    pub color_space: ColorSpace,
    /// Only used with "Raw_Manual_Gamma".
    pub gamma: f32,
    /// Premultiply chromatic channels by alpha.
    pub premultiply: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            color_space: ColorSpace::RawManualGamma,
            gamma: 1.0,
            premultiply: false,
        }
    }
}

impl OutputConfig {
    pub fn space(&self) -> OutputSpace {
        OutputSpace::resolve(self.color_space, self.gamma, self.premultiply)
    }
}
