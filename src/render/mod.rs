//! Rendering contract.
//!
//! This module defines what the cache hands to caller-supplied draw
//! procedures and how rendered images are keyed:
//!
//! - [`DrawProcedure`] / [`DrawParams`] — the stable draw contract. A
//!   procedure receives a mutable blank surface plus the resolved geometry
//!   for the tile it must paint.
//! - [`RenderContext`] / [`ContextKey`] — opaque identity handles under
//!   which a tile caches distinct rendered copies (e.g. one per output
//!   surface or device pixel ratio).
//! - [`debug_pattern`] — a built-in draw procedure that renders the grid
//!   outline with a per-coordinate tint, useful for visualizing a tile
//!   grid.

mod context;
mod debug;
mod params;

pub use context::{ContextKey, RenderContext};
pub use debug::debug_pattern;
pub use params::{DrawParams, DrawProcedure};
