//! State tokens produced by the navigation stack.
//!
//! Tokens are owned by whoever maintains the stack and shared with the display engine as
//! `Arc<T>`. The engine never mutates a token; it reads its kind tag for capability
//! checks, and compares `Arc` identity to decide whether a render is redundant.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// One node of application navigation state.
pub trait StateToken: fmt::Debug + Send + Sync + 'static {
    /// Variant tag used for capability lookups.
    type Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// The tag of this token's variant.
    fn kind(&self) -> Self::Kind;
}

/// Whether two shared tokens are the same navigation node (not merely equal values).
pub fn same_instance<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b)
}
