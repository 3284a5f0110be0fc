//! Tile coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate of one cell in a multi-resolution tile grid.
///
/// A coordinate is immutable once assigned to a tile. It serves both as the
/// cache key for tile lookup (the struct derives `Hash` and `Eq`, so it is
/// its own deterministic, unique key) and as the positional argument handed
/// to draw procedures.
///
/// `x` and `y` are signed: grids may extend in any direction from their
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level (0 = lowest resolution).
    pub zoom: u32,

    /// Tile X index, growing rightward from the grid origin.
    pub x: i32,

    /// Tile Y index, growing downward from the grid origin.
    pub y: i32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(zoom: u32, x: i32, y: i32) -> Self {
        Self { zoom, x, y }
    }

    /// Canonical `zoom/x/y` key string for this coordinate.
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}
