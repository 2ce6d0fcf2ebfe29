//! Display strategies: how a new element replaces the visible one.
//!
//! [`DisplayStrategy`] is the seam between the [`RenderCoordinator`] and the display
//! surface. Two implementations ship with the crate:
//!
//! - [`DirectDisplayStrategy`]: synchronous swap, never more than one attached element.
//! - [`AnimatedDisplayStrategy`]: the new element enters while the old ones exit, with
//!   each outgoing element detached exactly once however its transition ends.
//!
//! Integrators can provide their own strategies; [`current_matches`] holds the
//! idempotency check every strategy should apply to its current element.
//!
//! [`RenderCoordinator`]: crate::coordinator::RenderCoordinator

pub mod animated;
pub mod container;
pub mod direct;

pub use animated::{AnimatedDisplayStrategy, OutgoingTracker};
pub use container::Container;
pub use direct::DirectDisplayStrategy;

use crate::element::VisualElement;
use crate::error::{DisplayError, Result};
use crate::factory::ViewFactory;
use crate::render::ui::ColorTheme;
use crate::token::same_instance;
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Duration;

/// Ambient environment factories need to build views correctly.
#[derive(Debug, Clone, Default)]
pub struct DisplayContext {
    /// Area the display surface occupies.
    pub area: Rect,
    pub theme: ColorTheme,
}

impl DisplayContext {
    pub fn new(area: Rect, theme: ColorTheme) -> Self {
        Self { area, theme }
    }
}

/// Decides whether a render is redundant and swaps the visible element.
pub trait DisplayStrategy<T, V> {
    /// Whether the current element already renders `token`.
    ///
    /// True iff the current element's view kind equals `factory.kind_for(token)` and it is
    /// bound to this very token instance. Errors with
    /// [`DisplayError::InvariantViolation`] if the kinds match but the element has lost
    /// its bound token.
    fn already_showing(&self, token: &Arc<T>, factory: &dyn ViewFactory<T, V>) -> Result<bool>;

    /// Make `element` the current, topmost element.
    fn show(&mut self, element: VisualElement<T, V>);

    /// Remove every attached or animating element.
    fn clear_all(&mut self);

    fn display_context(&self) -> &DisplayContext;

    /// Replace the display context, e.g. after the surface is resized.
    fn set_display_context(&mut self, context: DisplayContext);

    /// Attached elements, topmost first.
    fn container(&self) -> &Container<T, V>;

    /// The element most recently shown and not yet cleared.
    fn current(&self) -> Option<&VisualElement<T, V>>;

    /// Drive running transitions forward. Strategies without transitions ignore this.
    fn advance(&mut self, _elapsed: Duration) {}

    /// True when no transition is in flight.
    fn is_settled(&self) -> bool {
        true
    }

    /// Hand over every element detached since the last call.
    fn take_detached(&mut self) -> Vec<VisualElement<T, V>>;
}

impl<T, V, S> DisplayStrategy<T, V> for Box<S>
where
    S: DisplayStrategy<T, V> + ?Sized,
{
    fn already_showing(&self, token: &Arc<T>, factory: &dyn ViewFactory<T, V>) -> Result<bool> {
        (**self).already_showing(token, factory)
    }

    fn show(&mut self, element: VisualElement<T, V>) {
        (**self).show(element)
    }

    fn clear_all(&mut self) {
        (**self).clear_all()
    }

    fn display_context(&self) -> &DisplayContext {
        (**self).display_context()
    }

    fn set_display_context(&mut self, context: DisplayContext) {
        (**self).set_display_context(context)
    }

    fn container(&self) -> &Container<T, V> {
        (**self).container()
    }

    fn current(&self) -> Option<&VisualElement<T, V>> {
        (**self).current()
    }

    fn advance(&mut self, elapsed: Duration) {
        (**self).advance(elapsed)
    }

    fn is_settled(&self) -> bool {
        (**self).is_settled()
    }

    fn take_detached(&mut self) -> Vec<VisualElement<T, V>> {
        (**self).take_detached()
    }
}

/// Idempotency check against the current element.
pub fn current_matches<T, V>(
    current: Option<&VisualElement<T, V>>,
    token: &Arc<T>,
    factory: &dyn ViewFactory<T, V>,
) -> Result<bool> {
    let Some(element) = current else {
        return Ok(false);
    };
    if element.kind() != factory.kind_for(token) {
        return Ok(false);
    }
    match element.token() {
        Some(bound) => Ok(same_instance(bound, token)),
        None => Err(DisplayError::invariant(format!(
            "current element {} ({}) has no bound token; views are bound on creation and \
             must not outlive the state they render",
            element.id(),
            element.kind()
        ))),
    }
}
