//! Rendered tile.
//!
//! A [`RenderedTile`] wraps one tile coordinate and defers all drawing
//! until an image is first requested. Rendered images are memoized per
//! rendering-context identity, so the draw procedure runs at most once per
//! distinct context for a given tile.
//!
//! Unlike tiles backed by a fetch, a canvas tile has no load-state machine:
//! it is logically loaded from the moment it is constructed, and the only
//! asynchrony-free cost is the synchronous draw on first access.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use image::RgbaImage;
use tracing::{debug, trace};

use crate::error::{GridError, RenderError};
use crate::grid::TileGrid;
use crate::render::{ContextKey, DrawParams, DrawProcedure, RenderContext};

use super::TileCoord;

/// One tile's rendering result, drawn lazily and memoized per context.
pub struct RenderedTile {
    /// Coordinate of this tile. Immutable.
    coord: TileCoord,

    /// Surface edge length in pixels, resolved once from the grid.
    size: u32,

    /// Grid shared with the owning source; resolves draw geometry.
    grid: Rc<dyn TileGrid>,

    /// Draw procedure shared with the owning source.
    draw: DrawProcedure,

    /// Rendered images keyed by context identity. Grows monotonically;
    /// discarded only with the whole tile.
    images: RefCell<HashMap<ContextKey, Rc<RgbaImage>>>,
}

impl RenderedTile {
    /// Create a tile for the given coordinate.
    ///
    /// Resolves the tile pixel size from the grid; no drawing occurs.
    ///
    /// # Errors
    ///
    /// Fails only if the grid cannot resolve a size for the coordinate's
    /// zoom level; the grid's error propagates unchanged.
    pub(crate) fn new(
        coord: TileCoord,
        grid: Rc<dyn TileGrid>,
        draw: DrawProcedure,
    ) -> Result<Self, GridError> {
        let size = grid.tile_size(coord.zoom)?;
        Ok(Self {
            coord,
            size,
            grid,
            draw,
            images: RefCell::new(HashMap::new()),
        })
    }

    /// Coordinate of this tile.
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Surface edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of per-context renders currently cached.
    pub fn rendered_contexts(&self) -> usize {
        self.images.borrow().len()
    }

    /// The rendered image for the given context, drawing it on first
    /// request.
    ///
    /// Repeated calls with the same context (or with no context) return the
    /// stored image without re-rendering. Distinct context identities get
    /// independent renders.
    ///
    /// # Errors
    ///
    /// Propagates grid geometry errors and draw-procedure failures
    /// unchanged. On failure nothing is stored, so a subsequent call
    /// retries the draw from scratch.
    pub fn image(&self, context: Option<&RenderContext>) -> Result<Rc<RgbaImage>, RenderError> {
        let key = ContextKey::for_context(context);
        if let Some(image) = self.images.borrow().get(&key) {
            trace!(coord = %self.coord, ?key, "tile image cache hit");
            return Ok(Rc::clone(image));
        }

        let params = DrawParams {
            coord: self.coord,
            extent: self.grid.extent(&self.coord)?,
            resolution: self.grid.resolution(&self.coord)?,
            tile_size: self.size,
        };

        let mut surface = RgbaImage::new(self.size, self.size);
        (self.draw)(&mut surface, &params)?;

        debug!(coord = %self.coord, ?key, size = self.size, "rendered tile image");
        let image = Rc::new(surface);
        self.images.borrow_mut().insert(key, Rc::clone(&image));
        Ok(image)
    }
}

impl fmt::Debug for RenderedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedTile")
            .field("coord", &self.coord)
            .field("size", &self.size)
            .field("rendered_contexts", &self.rendered_contexts())
            .finish()
    }
}
