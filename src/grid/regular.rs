//! Regular tile grid.
//!
//! A regular grid places square tiles of a uniform pixel size on a
//! rectangular lattice anchored at a top-left origin. Each zoom level has
//! one resolution; tile indices grow rightward (`x`) and downward (`y`)
//! from the origin.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::tile::TileCoord;

use super::{Extent, TileGrid};

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Half the equatorial circumference of the WGS84 spheroid in meters; the
/// magnitude of the spherical-Mercator extent on both axes.
pub const WEB_MERCATOR_EXTENT: f64 = 20_037_508.342_789_244;

// =============================================================================
// Grid Geometry
// =============================================================================

/// Configuration describing a [`RegularTileGrid`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridGeometry {
    /// X ordinate of the grid origin (left edge of tile column 0).
    pub origin_x: f64,

    /// Y ordinate of the grid origin (top edge of tile row 0).
    pub origin_y: f64,

    /// Resolution (map units per pixel) per zoom level, indexed by zoom.
    /// Must be non-empty and strictly decreasing.
    pub resolutions: Vec<f64>,

    /// Tile edge length in pixels, uniform across zoom levels.
    pub tile_size: u32,
}

// =============================================================================
// Regular Tile Grid
// =============================================================================

/// A regular square-tile grid with per-zoom resolutions.
#[derive(Debug, Clone)]
pub struct RegularTileGrid {
    geometry: GridGeometry,
}

impl RegularTileGrid {
    /// Create a grid from the given geometry.
    ///
    /// # Errors
    ///
    /// Fails immediately on malformed configuration: an empty resolution
    /// table, a resolution table that does not strictly decrease, or a zero
    /// tile size.
    pub fn new(geometry: GridGeometry) -> Result<Self, GridError> {
        if geometry.resolutions.is_empty() {
            return Err(GridError::EmptyResolutions);
        }
        if geometry.tile_size == 0 {
            return Err(GridError::ZeroTileSize);
        }
        for (index, pair) in geometry.resolutions.windows(2).enumerate() {
            if pair[1] >= pair[0] {
                return Err(GridError::NonDecreasingResolutions {
                    zoom: (index + 1) as u32,
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { geometry })
    }

    /// Create the standard global spherical-Mercator grid covering zoom
    /// levels `0..=max_zoom` with 256-pixel tiles.
    ///
    /// Zoom 0 covers the world extent with a single tile; every further
    /// zoom level halves the resolution.
    pub fn web_mercator(max_zoom: u32) -> Self {
        let base = 2.0 * WEB_MERCATOR_EXTENT / f64::from(DEFAULT_TILE_SIZE);
        let resolutions = (0..=max_zoom)
            .map(|zoom| base / f64::powi(2.0, zoom as i32))
            .collect();

        // The table is non-empty and halving keeps it strictly decreasing,
        // so construction cannot fail.
        Self {
            geometry: GridGeometry {
                origin_x: -WEB_MERCATOR_EXTENT,
                origin_y: WEB_MERCATOR_EXTENT,
                resolutions,
                tile_size: DEFAULT_TILE_SIZE,
            },
        }
    }

    /// The geometry this grid was built from.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    fn resolution_at(&self, zoom: u32) -> Result<f64, GridError> {
        self.geometry
            .resolutions
            .get(zoom as usize)
            .copied()
            .ok_or(GridError::ZoomOutOfRange {
                zoom,
                max_zoom: self.max_zoom(),
            })
    }
}

impl TileGrid for RegularTileGrid {
    fn tile_size(&self, zoom: u32) -> Result<u32, GridError> {
        self.resolution_at(zoom)?;
        Ok(self.geometry.tile_size)
    }

    fn resolution(&self, coord: &TileCoord) -> Result<f64, GridError> {
        self.resolution_at(coord.zoom)
    }

    fn extent(&self, coord: &TileCoord) -> Result<Extent, GridError> {
        let resolution = self.resolution_at(coord.zoom)?;
        let span = resolution * f64::from(self.geometry.tile_size);
        let min_x = self.geometry.origin_x + f64::from(coord.x) * span;
        let max_y = self.geometry.origin_y - f64::from(coord.y) * span;
        Ok(Extent::new(min_x, max_y - span, min_x + span, max_y))
    }

    fn max_zoom(&self) -> u32 {
        (self.geometry.resolutions.len() - 1) as u32
    }
}
