//! Keyed tile cache.
//!
//! The source does not implement eviction itself; it delegates tile
//! lifetime to an injected container satisfying [`KeyedTileCache`]. The
//! container decides *when* eviction is possible ([`can_expire_cache`]) and
//! performs it given the set of coordinates currently in use
//! ([`expire_cache`]) — the "what is in view right now" signal relayed from
//! the rendering pipeline.
//!
//! [`TileLruCache`] is the reference implementation: an unbounded LRU map
//! with a high-water mark. An expiry pass pops least-recently-used entries
//! while the cache is over its high-water mark, stopping as soon as the
//! least-recently-used entry is in the retain set.
//!
//! [`can_expire_cache`]: KeyedTileCache::can_expire_cache
//! [`expire_cache`]: KeyedTileCache::expire_cache

use std::collections::HashSet;
use std::rc::Rc;

use lru::LruCache;
use tracing::debug;

use super::{RenderedTile, TileCoord};

/// Default high-water mark for [`TileLruCache`], in entries.
pub const DEFAULT_HIGH_WATER_MARK: usize = 2048;

// =============================================================================
// KeyedTileCache Trait
// =============================================================================

/// Container contract for tiles keyed by coordinate.
///
/// Keys are [`TileCoord`] values, which identify tiles deterministically
/// and uniquely. Implementations own every tile stored in them; a tile is
/// destroyed when its entry is evicted and no caller holds a reference.
pub trait KeyedTileCache {
    /// Whether the cache holds an entry for the coordinate. Must not
    /// affect recency.
    fn contains_key(&self, coord: &TileCoord) -> bool;

    /// The tile stored under the coordinate, if any. Marks the entry as
    /// recently used.
    fn get(&mut self, coord: &TileCoord) -> Option<Rc<RenderedTile>>;

    /// Store a tile under the coordinate.
    fn set(&mut self, coord: TileCoord, tile: Rc<RenderedTile>);

    /// Whether the cache holds more entries than its configured capacity
    /// threshold.
    fn can_expire_cache(&self) -> bool;

    /// Evict entries not present in `used`, honoring the container's own
    /// retention and capacity policy.
    fn expire_cache(&mut self, used: &HashSet<TileCoord>);

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TileLruCache
// =============================================================================

/// LRU tile container with a high-water mark.
pub struct TileLruCache {
    entries: LruCache<TileCoord, Rc<RenderedTile>>,
    high_water: usize,
}

impl TileLruCache {
    /// Create a cache with the default high-water mark.
    pub fn new() -> Self {
        Self::with_high_water(DEFAULT_HIGH_WATER_MARK)
    }

    /// Create a cache that considers itself over capacity beyond
    /// `high_water` entries.
    pub fn with_high_water(high_water: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            high_water,
        }
    }

    /// The configured high-water mark.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl Default for TileLruCache {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyedTileCache for TileLruCache {
    fn contains_key(&self, coord: &TileCoord) -> bool {
        self.entries.contains(coord)
    }

    fn get(&mut self, coord: &TileCoord) -> Option<Rc<RenderedTile>> {
        self.entries.get(coord).cloned()
    }

    fn set(&mut self, coord: TileCoord, tile: Rc<RenderedTile>) {
        self.entries.put(coord, tile);
    }

    fn can_expire_cache(&self) -> bool {
        self.entries.len() > self.high_water
    }

    fn expire_cache(&mut self, used: &HashSet<TileCoord>) {
        let before = self.entries.len();
        while self.can_expire_cache() {
            match self.entries.peek_lru() {
                Some((coord, _)) if used.contains(coord) => break,
                Some(_) => {
                    self.entries.pop_lru();
                }
                None => break,
            }
        }

        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.entries.len(), "expired tile cache entries");
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
