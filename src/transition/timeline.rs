//! Clock that drives running transitions and reports how each one ended.

use crate::element::ElementId;
use crate::transition::{FinishReason, Property, Transition, TransitionFinished};
use std::time::Duration;

/// Set of running transitions, at most one per element.
///
/// Every transition handed to [`start`](Timeline::start) produces exactly one
/// [`TransitionFinished`] event: `Completed` when its clock runs out (immediately for
/// zero-length specs), or `Cancelled` when it is cancelled or replaced by a newer
/// transition on the same element. Events queue up until the owner drains them with
/// [`take_finished`](Timeline::take_finished).
#[derive(Debug, Default)]
pub struct Timeline {
    running: Vec<Transition>,
    finished: Vec<TransitionFinished>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `transition`, replacing any transition already running on its element.
    pub fn start(&mut self, transition: Transition) {
        self.cancel(transition.element());

        if transition.is_complete() {
            self.finished.push(transition.finish(FinishReason::Completed));
        } else {
            self.running.push(transition);
        }
    }

    /// Cancel the transition on `element`, if any. Returns whether one was running.
    pub fn cancel(&mut self, element: ElementId) -> bool {
        match self.running.iter().position(|t| t.element() == element) {
            Some(index) => {
                let transition = self.running.remove(index);
                self.finished.push(transition.finish(FinishReason::Cancelled));
                true
            }
            None => false,
        }
    }

    /// Move every running transition forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        let mut index = 0;
        while index < self.running.len() {
            if self.running[index].advance(delta) {
                let transition = self.running.remove(index);
                self.finished.push(transition.finish(FinishReason::Completed));
            } else {
                index += 1;
            }
        }
    }

    /// Drain the terminal events produced since the last call, in the order they occurred.
    pub fn take_finished(&mut self) -> Vec<TransitionFinished> {
        std::mem::take(&mut self.finished)
    }

    /// Current animated value for `element`, if it is transitioning.
    pub fn value_of(&self, element: ElementId) -> Option<(Property, f32)> {
        self.get(element)
            .map(|transition| (transition.spec().property, transition.value()))
    }

    pub fn get(&self, element: ElementId) -> Option<&Transition> {
        self.running.iter().find(|t| t.element() == element)
    }

    pub fn is_running(&self, element: ElementId) -> bool {
        self.get(element).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.running.iter()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// No running transitions and no undrained events.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.finished.is_empty()
    }
}
