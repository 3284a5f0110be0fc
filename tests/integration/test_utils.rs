//! Shared test fixtures: stub grids, instrumented draw procedures, and a
//! recording cache container.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use image::{Rgba, RgbaImage};

use tile_canvas::{
    CanvasSourceOptions, CanvasTileSource, DrawError, DrawParams, DrawProcedure, Extent, GridError,
    KeyedTileCache, RenderedTile, TileCoord, TileGrid,
};

// =============================================================================
// Stub Grid
// =============================================================================

/// Grid stub with a fixed tile size and unit resolution; fails for zoom
/// levels past `max_zoom`.
pub struct StubGrid {
    pub tile_size: u32,
    pub max_zoom: u32,
}

impl StubGrid {
    pub fn new(tile_size: u32, max_zoom: u32) -> Self {
        Self {
            tile_size,
            max_zoom,
        }
    }
}

impl TileGrid for StubGrid {
    fn tile_size(&self, zoom: u32) -> Result<u32, GridError> {
        if zoom > self.max_zoom {
            return Err(GridError::ZoomOutOfRange {
                zoom,
                max_zoom: self.max_zoom,
            });
        }
        Ok(self.tile_size)
    }

    fn resolution(&self, coord: &TileCoord) -> Result<f64, GridError> {
        self.tile_size(coord.zoom)?;
        Ok(1.0)
    }

    fn extent(&self, coord: &TileCoord) -> Result<Extent, GridError> {
        let span = f64::from(self.tile_size(coord.zoom)?);
        let min_x = f64::from(coord.x) * span;
        let max_y = -f64::from(coord.y) * span;
        Ok(Extent::new(min_x, max_y - span, min_x + span, max_y))
    }

    fn max_zoom(&self) -> u32 {
        self.max_zoom
    }
}

/// Source over a [`StubGrid`] with the given draw procedure.
pub fn stub_source(draw: DrawProcedure) -> CanvasTileSource {
    let grid = Rc::new(StubGrid::new(8, 4));
    CanvasTileSource::new(CanvasSourceOptions::new(draw, grid))
}

// =============================================================================
// Instrumented Draw Procedures
// =============================================================================

/// Marker value encoding a coordinate: `zoom*1000 + x*10 + y`.
pub fn marker_value(coord: TileCoord) -> u16 {
    (coord.zoom as i32 * 1000 + coord.x * 10 + coord.y) as u16
}

/// Decode a marker value from a pixel written by [`counting_marker_draw`].
pub fn decode_marker(pixel: &Rgba<u8>) -> u16 {
    (u16::from(pixel.0[0]) << 8) | u16::from(pixel.0[1])
}

/// Draw procedure that counts invocations and fills the surface with the
/// coordinate's marker value split across the red and green channels.
pub fn counting_marker_draw() -> (DrawProcedure, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let draw: DrawProcedure = Rc::new(move |surface: &mut RgbaImage, params: &DrawParams| {
        counter.set(counter.get() + 1);
        let marker = marker_value(params.coord);
        let pixel = Rgba([(marker >> 8) as u8, (marker & 0xFF) as u8, 0, 255]);
        for p in surface.pixels_mut() {
            *p = pixel;
        }
        Ok(())
    });
    (draw, count)
}

/// Draw procedure that always fails with the given message.
pub fn failing_draw(message: &str) -> DrawProcedure {
    let message = message.to_string();
    Rc::new(move |_surface: &mut RgbaImage, _params: &DrawParams| {
        Err(DrawError::new(message.clone()))
    })
}

// =============================================================================
// Recording Cache
// =============================================================================

/// One call made through the [`KeyedTileCache`] contract.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheCall {
    Get(TileCoord),
    Set(TileCoord),
    CanExpire,
    /// Retain set, sorted by key for deterministic assertions.
    Expire(Vec<TileCoord>),
}

/// Cache stub that records every call while behaving as a plain map.
pub struct RecordingCache {
    calls: Rc<RefCell<Vec<CacheCall>>>,
    entries: HashMap<TileCoord, Rc<RenderedTile>>,
    can_expire: bool,
}

impl RecordingCache {
    pub fn new(can_expire: bool) -> (Self, Rc<RefCell<Vec<CacheCall>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let cache = Self {
            calls: Rc::clone(&calls),
            entries: HashMap::new(),
            can_expire,
        };
        (cache, calls)
    }
}

impl KeyedTileCache for RecordingCache {
    fn contains_key(&self, coord: &TileCoord) -> bool {
        self.entries.contains_key(coord)
    }

    fn get(&mut self, coord: &TileCoord) -> Option<Rc<RenderedTile>> {
        self.calls.borrow_mut().push(CacheCall::Get(*coord));
        self.entries.get(coord).cloned()
    }

    fn set(&mut self, coord: TileCoord, tile: Rc<RenderedTile>) {
        self.calls.borrow_mut().push(CacheCall::Set(coord));
        self.entries.insert(coord, tile);
    }

    fn can_expire_cache(&self) -> bool {
        self.calls.borrow_mut().push(CacheCall::CanExpire);
        self.can_expire
    }

    fn expire_cache(&mut self, used: &HashSet<TileCoord>) {
        let mut retained: Vec<_> = used.iter().copied().collect();
        retained.sort_by_key(|c| c.key());
        self.calls.borrow_mut().push(CacheCall::Expire(retained));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
