//! Ordered list of attached elements, topmost first.

use crate::element::{ElementId, VisualElement};

/// The display surface's children in z-order (index 0 is drawn last, on top).
///
/// Detached elements are moved into an outbox rather than dropped, so the integrator
/// can release view resources or recycle them via [`take_detached`](Container::take_detached).
#[derive(Debug)]
pub struct Container<T, V> {
    children: Vec<VisualElement<T, V>>,
    detached: Vec<VisualElement<T, V>>,
}

impl<T, V> Default for Container<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Container<T, V> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            detached: Vec::new(),
        }
    }

    /// Attach ahead of every existing child.
    pub fn attach_top(&mut self, element: VisualElement<T, V>) {
        self.children.insert(0, element);
    }

    pub fn top(&self) -> Option<&VisualElement<T, V>> {
        self.children.first()
    }

    pub fn get(&self, id: ElementId) -> Option<&VisualElement<T, V>> {
        self.children.iter().find(|element| element.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut VisualElement<T, V>> {
        self.children.iter_mut().find(|element| element.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.children.iter().position(|element| element.id() == id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children topmost first.
    pub fn iter(&self) -> impl Iterator<Item = &VisualElement<T, V>> {
        self.children.iter()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.children.iter().map(VisualElement::id).collect()
    }

    /// Detach one child. Returns false if it was not attached.
    pub fn detach(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.children.remove(index);
                self.detached.push(element);
                true
            }
            None => false,
        }
    }

    /// Detach every child, returning how many were attached.
    pub fn detach_all(&mut self) -> usize {
        let count = self.children.len();
        self.detached.append(&mut self.children);
        count
    }

    /// Hand over everything detached since the last call.
    pub fn take_detached(&mut self) -> Vec<VisualElement<T, V>> {
        std::mem::take(&mut self.detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ViewKind;
    use std::sync::Arc;

    fn element(label: &'static str) -> VisualElement<(), &'static str> {
        VisualElement::bind(Arc::new(()), ViewKind::new("test"), label)
    }

    #[test]
    fn attach_top_orders_newest_first() {
        let mut container = Container::new();
        let first = element("first");
        let second = element("second");
        let (first_id, second_id) = (first.id(), second.id());

        container.attach_top(first);
        container.attach_top(second);

        assert_eq!(container.ids(), vec![second_id, first_id]);
        assert_eq!(container.top().map(|e| *e.view()), Some("second"));
        assert_eq!(container.index_of(first_id), Some(1));
    }

    #[test]
    fn detach_moves_to_outbox_once() {
        let mut container = Container::new();
        let only = element("only");
        let id = only.id();
        container.attach_top(only);

        assert!(container.detach(id));
        assert!(!container.detach(id));
        assert!(container.is_empty());

        let detached = container.take_detached();
        assert_eq!(detached.len(), 1);
        assert_eq!(detached[0].id(), id);
        assert!(container.take_detached().is_empty());
    }

    #[test]
    fn detach_all_preserves_order() {
        let mut container = Container::new();
        container.attach_top(element("a"));
        container.attach_top(element("b"));

        assert_eq!(container.detach_all(), 2);
        assert_eq!(container.len(), 0);
        let views: Vec<_> = container
            .take_detached()
            .into_iter()
            .map(|e| *e.view())
            .collect();
        assert_eq!(views, vec!["b", "a"]);
    }
}
