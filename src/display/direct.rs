//! Synchronous, single-occupancy display strategy.

use crate::display::{current_matches, Container, DisplayContext, DisplayStrategy};
use crate::element::VisualElement;
use crate::error::Result;
use crate::factory::ViewFactory;
use std::sync::Arc;

/// Detaches the old element and attaches the new one in the same call.
///
/// At most one element is ever attached, so the topmost child is the current one.
#[derive(Debug)]
pub struct DirectDisplayStrategy<T, V> {
    container: Container<T, V>,
    context: DisplayContext,
}

impl<T, V> DirectDisplayStrategy<T, V> {
    pub fn new(context: DisplayContext) -> Self {
        Self {
            container: Container::new(),
            context,
        }
    }
}

impl<T, V> DisplayStrategy<T, V> for DirectDisplayStrategy<T, V> {
    fn already_showing(&self, token: &Arc<T>, factory: &dyn ViewFactory<T, V>) -> Result<bool> {
        current_matches(self.container.top(), token, factory)
    }

    fn show(&mut self, element: VisualElement<T, V>) {
        self.container.detach_all();
        self.container.attach_top(element);
    }

    fn clear_all(&mut self) {
        self.container.detach_all();
    }

    fn display_context(&self) -> &DisplayContext {
        &self.context
    }

    fn set_display_context(&mut self, context: DisplayContext) {
        self.context = context;
    }

    fn container(&self) -> &Container<T, V> {
        &self.container
    }

    fn current(&self) -> Option<&VisualElement<T, V>> {
        self.container.top()
    }

    fn take_detached(&mut self) -> Vec<VisualElement<T, V>> {
        self.container.take_detached()
    }
}
