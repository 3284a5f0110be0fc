//! Cache delegation and eviction tests.

use std::collections::HashSet;
use std::rc::Rc;

use tile_canvas::{
    CanvasSourceOptions, CanvasTileSource, RenderContext, TileCoord, TileLruCache,
};

use super::test_utils::{counting_marker_draw, CacheCall, RecordingCache, StubGrid};

fn recording_source(can_expire: bool) -> (CanvasTileSource, Rc<std::cell::RefCell<Vec<CacheCall>>>)
{
    let (cache, calls) = RecordingCache::new(can_expire);
    let (draw, _count) = counting_marker_draw();
    let grid = Rc::new(StubGrid::new(8, 4));
    let source = CanvasTileSource::with_cache(CanvasSourceOptions::new(draw, grid), cache);
    (source, calls)
}

// =============================================================================
// Delegation
// =============================================================================

#[test]
fn test_can_expire_forwards_to_container() {
    let (source, calls) = recording_source(true);
    assert!(source.can_expire_cache());

    let (source, calls_false) = recording_source(false);
    assert!(!source.can_expire_cache());

    assert_eq!(calls.borrow().as_slice(), &[CacheCall::CanExpire]);
    assert_eq!(calls_false.borrow().as_slice(), &[CacheCall::CanExpire]);
}

#[test]
fn test_expire_forwards_used_coordinates_unchanged() {
    let (source, calls) = recording_source(true);

    let used: HashSet<_> = [TileCoord::new(1, 0, 0), TileCoord::new(1, 1, 0)]
        .into_iter()
        .collect();
    source.expire_cache(&used);

    let expected = vec![TileCoord::new(1, 0, 0), TileCoord::new(1, 1, 0)];
    assert_eq!(calls.borrow().as_slice(), &[CacheCall::Expire(expected)]);
}

#[test]
fn test_tile_lookup_goes_through_container() {
    let (source, calls) = recording_source(false);

    source.tile(2, 1, 1).unwrap();
    source.tile(2, 1, 1).unwrap();

    let coord = TileCoord::new(2, 1, 1);
    assert_eq!(
        calls.borrow().as_slice(),
        &[
            CacheCall::Get(coord),
            CacheCall::Set(coord),
            CacheCall::Get(coord),
        ]
    );
}

// =============================================================================
// LRU Eviction Through the Source
// =============================================================================

fn lru_source(high_water: usize) -> CanvasTileSource {
    let (draw, _count) = counting_marker_draw();
    let grid = Rc::new(StubGrid::new(8, 4));
    CanvasTileSource::with_cache(
        CanvasSourceOptions::new(draw, grid),
        TileLruCache::with_high_water(high_water),
    )
}

#[test]
fn test_expiry_pass_evicts_unused_tiles() {
    let source = lru_source(2);

    source.tile(0, 0, 0).unwrap();
    source.tile(0, 1, 0).unwrap();
    source.tile(0, 2, 0).unwrap();

    assert_eq!(source.cached_tiles(), 3);
    assert!(source.can_expire_cache());

    let used: HashSet<_> = [TileCoord::new(0, 2, 0)].into_iter().collect();
    source.expire_cache(&used);

    assert_eq!(source.cached_tiles(), 2);
    assert!(!source.can_expire_cache());
}

#[test]
fn test_eviction_discards_per_context_renders() {
    let source = lru_source(1);

    let evicted = source.tile(0, 0, 0).unwrap();
    evicted.image(Some(&RenderContext::new())).unwrap();
    source.tile(0, 1, 0).unwrap();

    source.expire_cache(&HashSet::new());
    assert_eq!(source.cached_tiles(), 1);

    // A fresh request for the evicted coordinate creates a new tile with
    // an empty per-context cache.
    let recreated = source.tile(0, 0, 0).unwrap();
    assert!(!Rc::ptr_eq(&evicted, &recreated));
    assert_eq!(recreated.rendered_contexts(), 0);
}

#[test]
fn test_surviving_tile_keeps_identity_and_renders() {
    let source = lru_source(1);

    source.tile(0, 0, 0).unwrap();
    let survivor = source.tile(0, 1, 0).unwrap();
    survivor.image(None).unwrap();

    // coord (0,0,0) is least recently used and gets evicted.
    source.expire_cache(&HashSet::new());

    let again = source.tile(0, 1, 0).unwrap();
    assert!(Rc::ptr_eq(&survivor, &again));
    assert_eq!(again.rendered_contexts(), 1);
}
