//! View construction contract.
//!
//! The display engine never builds views itself. Integrators implement [`ViewFactory`]
//! for every token kind their [`CapabilityRegistry`](crate::registry::CapabilityRegistry)
//! claims; the factory must be total over those kinds.

use crate::display::DisplayContext;
use crate::element::ViewKind;
use std::sync::Arc;

/// Builds view payloads of type `V` for tokens of type `T`.
pub trait ViewFactory<T, V> {
    /// The view kind this token renders as.
    fn kind_for(&self, token: &T) -> ViewKind;

    /// Build a new view for `token` in the given display context.
    fn create_for(&self, token: &Arc<T>, context: &DisplayContext) -> V;

    /// Whether the view for `token` fully covers what is underneath it.
    ///
    /// Overlay compositors use this to decide if lower layers still need drawing.
    /// Override for dialogs and other partial-screen views.
    fn is_opaque(&self, _token: &T) -> bool {
        true
    }
}
