//! # tile-canvas
//!
//! A lazy, per-coordinate rendering cache for gridded 2D surfaces.
//!
//! Instead of fetching tiles from a server, a [`CanvasTileSource`] renders
//! them with a caller-supplied draw procedure the first time each tile is
//! observed, and memoizes the result. Rendering is synchronous and
//! single-threaded: there is no fetch state machine, no pending or error
//! tile states, and no background work.
//!
//! ## Features
//!
//! - **Render on first access**: the draw procedure runs at most once per
//!   (tile, rendering context) pair; repeated requests return the cached
//!   image.
//! - **Context-keyed memoization**: distinct [`RenderContext`] identities
//!   get independent renders, so consumers with differing ambient state
//!   (such as device pixel ratio) never share an image.
//! - **Delegated eviction**: tile lifetime belongs to an injected
//!   [`KeyedTileCache`]; the source only relays the pipeline's "these
//!   coordinates are in use" signal.
//! - **Pluggable geometry**: tile sizes, extents, and resolutions come
//!   from a [`TileGrid`] implementation; [`RegularTileGrid`] ships with
//!   the crate.
//!
//! ## Architecture
//!
//! - [`tile`] - tile coordinates, the rendered tile, the source, and the
//!   cache container contract
//! - [`grid`] - the tile grid trait and the regular reference grid
//! - [`render`] - the draw contract, context identity, and the built-in
//!   debug pattern
//! - [`error`] - error types
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use image::{Rgba, RgbaImage};
//! use tile_canvas::{
//!     CanvasSourceOptions, CanvasTileSource, DrawParams, DrawProcedure, RegularTileGrid,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let draw: DrawProcedure = Rc::new(|surface: &mut RgbaImage, _params: &DrawParams| {
//!     for pixel in surface.pixels_mut() {
//!         *pixel = Rgba([0, 100, 200, 255]);
//!     }
//!     Ok(())
//! });
//!
//! let grid = Rc::new(RegularTileGrid::web_mercator(4));
//! let source = CanvasTileSource::new(CanvasSourceOptions::new(draw, grid));
//!
//! let tile = source.tile(1, 0, 0)?;
//! let image = tile.image(None)?;
//! assert_eq!(image.dimensions(), (256, 256));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod grid;
pub mod render;
pub mod tile;

// Re-export commonly used types
pub use error::{DrawError, GridError, RenderError};
pub use grid::{
    Extent, GridGeometry, RegularTileGrid, TileGrid, DEFAULT_TILE_SIZE, WEB_MERCATOR_EXTENT,
};
pub use render::{debug_pattern, ContextKey, DrawParams, DrawProcedure, RenderContext};
pub use tile::{
    CanvasSourceOptions, CanvasTileSource, KeyedTileCache, RenderedTile, TileCoord, TileLruCache,
    DEFAULT_HIGH_WATER_MARK,
};
