//! Built-in debug draw procedure.
//!
//! Renders a grid outline with a tint derived from the tile coordinate, so
//! that a tile grid can be visualized without any caller-supplied drawing
//! code. Neighboring tiles get visually distinct tints.

use std::rc::Rc;

use image::{Rgba, RgbaImage};

use crate::tile::TileCoord;

use super::params::{DrawParams, DrawProcedure};

const BORDER: Rgba<u8> = Rgba([40, 40, 40, 255]);

/// Draw procedure rendering a one-pixel grid outline and a per-coordinate
/// interior tint.
pub fn debug_pattern() -> DrawProcedure {
    Rc::new(|surface: &mut RgbaImage, params: &DrawParams| {
        let tint = coord_tint(params.coord);
        let (width, height) = surface.dimensions();
        for (x, y, pixel) in surface.enumerate_pixels_mut() {
            let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            *pixel = if on_border { BORDER } else { tint };
        }
        Ok(())
    })
}

// Multiplicative hash of the coordinate, folded into a light tint.
fn coord_tint(coord: TileCoord) -> Rgba<u8> {
    let mut h = u64::from(coord.zoom);
    h = h.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(coord.x as u64);
    h = h.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(coord.y as u64);
    Rgba([
        160 + (h & 0x3F) as u8,
        160 + ((h >> 6) & 0x3F) as u8,
        160 + ((h >> 12) & 0x3F) as u8,
        255,
    ])
}
