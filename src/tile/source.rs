//! Canvas tile source.
//!
//! Maps `(zoom, x, y)` coordinates to [`RenderedTile`] instances, creating
//! them lazily and storing them in a keyed cache container. At most one
//! tile instance exists per coordinate: repeated requests return the
//! identical `Rc`, so a tile's per-context image cache persists across
//! calls.
//!
//! The source owns no eviction logic. It forwards the rendering pipeline's
//! expiration protocol — "these coordinates are in use right now" — to the
//! container unchanged.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::GridError;
use crate::grid::TileGrid;
use crate::render::DrawProcedure;

use super::{KeyedTileCache, RenderedTile, TileCoord, TileLruCache};

// =============================================================================
// Options
// =============================================================================

/// Construction options for [`CanvasTileSource`].
pub struct CanvasSourceOptions {
    /// Draw procedure invoked for every tile render.
    pub draw: DrawProcedure,

    /// Grid resolving tile sizes and draw geometry.
    pub grid: Rc<dyn TileGrid>,

    /// Projection code passed through to the consuming pipeline.
    pub projection: Option<String>,

    /// Whether rendered tiles are known to be fully opaque.
    pub opaque: bool,
}

impl CanvasSourceOptions {
    /// Options with the required draw procedure and grid; no projection,
    /// not opaque.
    pub fn new(draw: DrawProcedure, grid: Rc<dyn TileGrid>) -> Self {
        Self {
            draw,
            grid,
            projection: None,
            opaque: false,
        }
    }

    /// Set the projection code.
    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// Mark rendered tiles as fully opaque.
    pub fn with_opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }
}

// =============================================================================
// CanvasTileSource
// =============================================================================

/// Tile source that renders tiles with a draw procedure instead of
/// fetching them.
pub struct CanvasTileSource {
    draw: DrawProcedure,
    grid: Rc<dyn TileGrid>,
    projection: Option<String>,
    opaque: bool,

    /// Owns every tile this source has created. Not shared across sources.
    cache: RefCell<Box<dyn KeyedTileCache>>,
}

impl CanvasTileSource {
    /// Create a source with a fresh [`TileLruCache`].
    pub fn new(options: CanvasSourceOptions) -> Self {
        Self::with_cache(options, TileLruCache::new())
    }

    /// Create a source with an injected cache container.
    pub fn with_cache(options: CanvasSourceOptions, cache: impl KeyedTileCache + 'static) -> Self {
        Self {
            draw: options.draw,
            grid: options.grid,
            projection: options.projection,
            opaque: options.opaque,
            cache: RefCell::new(Box::new(cache)),
        }
    }

    /// The tile at `(zoom, x, y)`, creating it on first request.
    ///
    /// Repeated calls for the same coordinate return the identical tile
    /// instance. Coordinates are not validated against grid bounds here;
    /// only the grid's own zoom-level checks apply.
    ///
    /// # Errors
    ///
    /// Propagates the grid's error when it cannot resolve a tile size for
    /// the zoom level; nothing is inserted into the cache in that case.
    pub fn tile(&self, zoom: u32, x: i32, y: i32) -> Result<Rc<RenderedTile>, GridError> {
        let coord = TileCoord::new(zoom, x, y);
        if let Some(tile) = self.cache.borrow_mut().get(&coord) {
            trace!(%coord, "tile cache hit");
            return Ok(tile);
        }

        let tile = Rc::new(RenderedTile::new(
            coord,
            Rc::clone(&self.grid),
            Rc::clone(&self.draw),
        )?);
        self.cache.borrow_mut().set(coord, Rc::clone(&tile));
        trace!(%coord, "created tile");
        Ok(tile)
    }

    /// Whether the cache container is over its capacity threshold.
    /// Forwards to the container.
    pub fn can_expire_cache(&self) -> bool {
        self.cache.borrow().can_expire_cache()
    }

    /// Evict cached tiles not present in `used`. Forwards to the
    /// container; the retention and capacity policy is the container's.
    pub fn expire_cache(&self, used: &HashSet<TileCoord>) {
        self.cache.borrow_mut().expire_cache(used);
    }

    /// Number of tiles currently cached.
    pub fn cached_tiles(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Projection code this source was configured with.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Whether rendered tiles are known to be fully opaque.
    pub fn opaque(&self) -> bool {
        self.opaque
    }
}

impl fmt::Debug for CanvasTileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasTileSource")
            .field("projection", &self.projection)
            .field("opaque", &self.opaque)
            .field("cached_tiles", &self.cached_tiles())
            .finish()
    }
}
