//! tile-canvas - render a debug tile pyramid to PNG files.
//!
//! This binary exercises the rendering cache end-to-end: it builds a
//! Web-Mercator grid, renders every tile in a zoom range with the built-in
//! debug pattern, writes the tiles as `<out>/<z>/<x>/<y>.png`, and runs an
//! expiration pass retaining only the deepest zoom level.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_canvas::{
    debug_pattern, CanvasSourceOptions, CanvasTileSource, RegularTileGrid, TileCoord, TileLruCache,
    DEFAULT_HIGH_WATER_MARK,
};

/// Deepest zoom level the renderer accepts; zoom 8 is already 65536 tiles.
const MAX_RENDER_ZOOM: u32 = 8;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Render a debug tile pyramid to PNG files.
#[derive(Parser, Debug)]
#[command(name = "tile-canvas")]
#[command(author, version, about, long_about = None)]
struct Config {
    /// Lowest zoom level to render.
    #[arg(long, default_value_t = 0, env = "TILE_CANVAS_MIN_ZOOM")]
    min_zoom: u32,

    /// Highest zoom level to render (inclusive).
    #[arg(long, default_value_t = 2, env = "TILE_CANVAS_MAX_ZOOM")]
    max_zoom: u32,

    /// Output directory for rendered tiles.
    #[arg(short, long, default_value = "tiles", env = "TILE_CANVAS_OUT")]
    out: PathBuf,

    /// Tile cache high-water mark, in entries.
    #[arg(long, default_value_t = DEFAULT_HIGH_WATER_MARK, env = "TILE_CANVAS_HIGH_WATER")]
    high_water: usize,

    /// Print final statistics as JSON on stdout.
    #[arg(long, default_value_t = false)]
    stats_json: bool,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(config.verbose);

    if config.min_zoom > config.max_zoom {
        error!(
            "--min-zoom {} exceeds --max-zoom {}",
            config.min_zoom, config.max_zoom
        );
        return ExitCode::FAILURE;
    }
    if config.max_zoom > MAX_RENDER_ZOOM {
        error!(
            "--max-zoom {} exceeds the render limit of {}",
            config.max_zoom, MAX_RENDER_ZOOM
        );
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("render failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let grid = Rc::new(RegularTileGrid::web_mercator(config.max_zoom));
    let source = CanvasTileSource::with_cache(
        CanvasSourceOptions::new(debug_pattern(), grid).with_projection("EPSG:3857"),
        TileLruCache::with_high_water(config.high_water),
    );

    info!(
        min_zoom = config.min_zoom,
        max_zoom = config.max_zoom,
        out = %config.out.display(),
        "rendering tile pyramid"
    );

    let mut written = 0usize;
    let mut deepest_level: HashSet<TileCoord> = HashSet::new();

    for zoom in config.min_zoom..=config.max_zoom {
        let side = 1_i64 << zoom;
        let mut level = HashSet::new();

        for x in 0..side {
            let dir = config.out.join(zoom.to_string()).join(x.to_string());
            std::fs::create_dir_all(&dir)?;

            for y in 0..side {
                let tile = source.tile(zoom, x as i32, y as i32)?;
                let image = tile.image(None)?;
                image.save(dir.join(format!("{}.png", y)))?;
                level.insert(tile.coord());
                written += 1;
            }
        }

        debug!(zoom, tiles = level.len(), "rendered zoom level");
        deepest_level = level;
    }

    // Relay the expiration protocol the way a rendering pipeline would:
    // the deepest level is what is "in view" after the render.
    let before = source.cached_tiles();
    if source.can_expire_cache() {
        source.expire_cache(&deepest_level);
        info!(
            before,
            after = source.cached_tiles(),
            "expired tile cache"
        );
    }

    info!(written, cached = source.cached_tiles(), "render complete");

    if config.stats_json {
        let stats = serde_json::json!({
            "tiles_written": written,
            "tiles_cached": source.cached_tiles(),
            "min_zoom": config.min_zoom,
            "max_zoom": config.max_zoom,
            "out": config.out.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tile_canvas=debug"
    } else {
        "tile_canvas=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
