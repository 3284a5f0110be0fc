//! Tile layer.
//!
//! This module holds the two core components of the rendering cache and
//! the container contract between them:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              CanvasTileSource                │
//! │   tile(z, x, y)         expire protocol      │
//! │        │                      │              │
//! │        ▼                      ▼              │
//! │  ┌──────────────┐    ┌─────────────────┐     │
//! │  │ RenderedTile │    │ KeyedTileCache  │     │
//! │  │ (per-context │    │ (TileLruCache)  │     │
//! │  │  image cache)│    │                 │     │
//! │  └──────────────┘    └─────────────────┘     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! - [`TileCoord`]: `(zoom, x, y)` identity of a grid cell; also the cache
//!   key.
//! - [`RenderedTile`]: one tile's lazily drawn, per-context memoized
//!   images.
//! - [`CanvasTileSource`]: coordinate-to-tile mapping with referential
//!   stability and cache-expiration forwarding.
//! - [`KeyedTileCache`] / [`TileLruCache`]: the injected container
//!   contract and its LRU reference implementation.

mod cache;
mod coord;
mod rendered;
mod source;

pub use cache::{KeyedTileCache, TileLruCache, DEFAULT_HIGH_WATER_MARK};
pub use coord::TileCoord;
pub use rendered::RenderedTile;
pub use source::{CanvasSourceOptions, CanvasTileSource};
