// src/main.rs

use render_passes::{
    accum::PassAccumulator,
    color::Rgba,
    config::Config,
    film::{composite_pixel, PassFilm, PassTile},
    passes::{InternalPassKind, PassCatalog},
};

use anyhow::Context;
use log::{debug, info};

const FILM_WIDTH: usize = 2;
const FILM_HEIGHT: usize = 1;

/// Configuration used when no file is given.
const DEFAULT_CONFIG: &str = r#"{
    "passes": {
        "bindings": {
            "pass_Depth": "z-depth-norm",
            "pass_Spec": "adv-glossy",
            "pass_Shadow": "shadow"
        }
    },
    "output": { "color_space": "sRGB" }
}"#;

/// Shades one synthetic sub-sample into `acc`. Stands in for a surface
/// integrator writing the passes it computes.
fn shade_sample(acc: &mut PassAccumulator<'_>, depth: f32, glossy: Rgba, lit: bool) {
    acc.probe_set(InternalPassKind::ZDepthNorm, Rgba::gray(depth), true);
    let glossy = acc.probe_add(InternalPassKind::Glossy, glossy, true);
    acc.probe_set(InternalPassKind::Shadow, Rgba::gray(1.0), !lit);
    if let Some(combined) = acc.color_mut(InternalPassKind::Combined) {
        *combined += glossy;
    }
}

fn log_tiles(label: &str, catalog: &PassCatalog, tiles: &[PassTile]) {
    for (entry, tile) in catalog.entries().zip(tiles) {
        let name = catalog.external_name(entry.external).unwrap_or("?");
        info!("{} {:>8} ({:?}): {:?}", label, name, tile.shape, tile.data());
    }
}

/// Main entry point for the `render-passes` demo.
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    // --- Configuration ---
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).context("Failed to load configuration")?,
        None => {
            info!("No configuration file given, using built-in passes.");
            Config::from_json_str(DEFAULT_CONFIG).context("Built-in configuration is invalid")?
        }
    };
    let catalog = config.passes.build_catalog();
    info!("Catalog has {} external passes", catalog.count());
    for entry in catalog.entries() {
        debug!("  {:?} <- {:?}", entry.external, entry.internal);
    }

    // --- Shading ---
    let mut film = PassFilm::new(&catalog, FILM_WIDTH, FILM_HEIGHT);
    let mut pixel_total = PassAccumulator::for_catalog(&catalog);
    for x in 0..FILM_WIDTH {
        pixel_total.reset_all();
        let samples = [
            (0.25, Rgba::new(0.1, 0.1, 0.1, 1.0), true),
            (0.75, Rgba::new(0.1, 0.1, 0.1, 1.0), x == 0),
        ];
        for (depth, glossy, lit) in samples {
            let mut sample = PassAccumulator::for_catalog(&catalog);
            shade_sample(&mut sample, depth, glossy, lit);
            film.add_sample(x, 0, &sample, 1.0);
            pixel_total.merge_add(&sample);
        }
        for kind in pixel_total.enabled_kinds() {
            info!("pixel {} {:?} = {}", x, kind, pixel_total.color(kind));
        }
    }

    // --- Output ---
    let primary = config.output.space();
    log_tiles("film", &catalog, &film.develop(&primary));

    let mut direct = PassTile::for_catalog(&catalog, 1, 1);
    composite_pixel(&catalog, &pixel_total, &primary, &mut direct, 0, 0);
    log_tiles("last pixel", &catalog, &direct);

    if let Some(secondary) = config.output2 {
        log_tiles("film (output2)", &catalog, &film.develop(&secondary.space()));
    }

    info!("render-passes exited successfully.");
    Ok(())
}
