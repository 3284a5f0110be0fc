//! Draw procedure contract.

use std::rc::Rc;

use image::RgbaImage;

use crate::error::DrawError;
use crate::grid::Extent;
use crate::tile::TileCoord;

/// Caller-supplied rendering callback.
///
/// The procedure receives a blank square surface and the resolved geometry
/// for the tile it must paint. It is invoked at most once per distinct
/// rendering context for a given tile, may be invoked any number of times
/// across tiles, and must fully paint the surface it is given — a
/// procedure that paints nothing yields a blank (fully transparent) tile,
/// which is not an error.
///
/// The `&mut` borrow of the surface ends with the call; the surface is
/// owned by the tile afterwards and shared with callers read-only.
pub type DrawProcedure = Rc<dyn Fn(&mut RgbaImage, &DrawParams) -> Result<(), DrawError>>;

// =============================================================================
// DrawParams
// =============================================================================

/// Resolved geometry handed to a draw procedure.
///
/// This is the stable draw contract: the tile coordinate together with its
/// map-space extent, the resolution at its zoom level, and the surface edge
/// length in pixels. The map-to-pixel transform is derived from these via
/// [`DrawParams::map_to_pixel`].
#[derive(Debug, Clone)]
pub struct DrawParams {
    /// Coordinate of the tile being drawn.
    pub coord: TileCoord,

    /// Map-space extent covered by the tile.
    pub extent: Extent,

    /// Resolution at the tile's zoom level, in map units per pixel.
    pub resolution: f64,

    /// Surface edge length in pixels.
    pub tile_size: u32,
}

impl DrawParams {
    /// Transform a map-space position into surface pixel coordinates.
    ///
    /// The extent's top-left corner maps to pixel (0, 0); pixel y grows
    /// downward.
    pub fn map_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.extent.min_x) / self.resolution,
            (self.extent.max_y - y) / self.resolution,
        )
    }
}
