//! Rendering context identity.
//!
//! Rendered images are cached per *context identity*, not per context
//! value: two separately created contexts never share a cache slot, even
//! if they are otherwise indistinguishable. This matters because consumers
//! may attach ambient state (such as a device pixel ratio) to a context,
//! and a render produced for one context must not leak to another.
//!
//! A [`RenderContext`] is an opaque handle carrying an identifier assigned
//! at creation. Copying the handle preserves identity, the way copying an
//! object reference does in environments that key caches by object
//! identity.

use std::sync::atomic::{AtomicU64, Ordering};

// Id 0 is reserved for the no-context sentinel.
static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// RenderContext
// =============================================================================

/// Opaque identity handle under which a tile caches a rendered copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderContext {
    id: u64,
}

impl RenderContext {
    /// Create a context with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The identifier backing this context's identity.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ContextKey
// =============================================================================

/// Cache key derived from an optional rendering context.
///
/// Requests without a context all map to the fixed [`ContextKey::NONE`]
/// slot, so "no context" behaves as one more logical context with its own
/// independent cached render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(u64);

impl ContextKey {
    /// The sentinel key used when no context is supplied.
    pub const NONE: ContextKey = ContextKey(0);

    /// Key for the given optional context.
    pub fn for_context(context: Option<&RenderContext>) -> Self {
        match context {
            Some(context) => ContextKey(context.id),
            None => Self::NONE,
        }
    }
}
