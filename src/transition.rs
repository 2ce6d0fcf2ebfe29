//! Transition specifications and running transition instances.
//!
//! A [`TransitionSpec`] is an immutable description (property, keyframes, timing, curve)
//! that strategies keep as a template. Every element that animates gets its own
//! [`Transition`] built from the spec, so concurrent transitions never share state.
//! Running transitions are driven by a [`Timeline`], which reports each one's end
//! exactly once as a [`TransitionFinished`] event.

pub mod easing;
pub mod timeline;

pub use easing::Easing;
pub use timeline::Timeline;

use crate::element::ElementId;
use std::time::Duration;

/// Which element property a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Opacity in `[0.0, 1.0]`.
    Opacity,
    /// Horizontal offset in cells.
    OffsetX,
}

/// Whether a transition brings an element in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Enter,
    Exit,
}

/// How a transition ended.
///
/// Bookkeeping treats both the same way; the distinction only matters for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    Cancelled,
}

/// Terminal event for one transition instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFinished {
    pub element: ElementId,
    pub direction: Direction,
    pub reason: FinishReason,
    /// Property value at the moment the transition ended.
    pub property: Property,
    pub value: f32,
}

/// Immutable transition template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    /// Time the value is held at `from` before animating.
    pub hold: Duration,
    /// Length of the animated part.
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(property: Property, from: f32, to: f32, duration: Duration) -> Self {
        Self {
            property,
            from,
            to,
            hold: Duration::ZERO,
            duration,
            easing: Easing::Linear,
        }
    }

    /// Opacity 0 → 1.
    pub fn fade_in(duration: Duration) -> Self {
        Self::new(Property::Opacity, 0.0, 1.0, duration)
    }

    /// Opacity 1 → 0.
    pub fn fade_out(duration: Duration) -> Self {
        Self::new(Property::Opacity, 1.0, 0.0, duration)
    }

    /// Horizontal slide between two offsets.
    pub fn slide(from: f32, to: f32, duration: Duration) -> Self {
        Self::new(Property::OffsetX, from, to, duration)
    }

    /// Jump straight to `to`. Finishes the moment it starts.
    pub fn instant(property: Property, to: f32) -> Self {
        Self::new(property, to, to, Duration::ZERO)
    }

    #[must_use]
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Hold plus animated duration.
    pub fn total(&self) -> Duration {
        self.hold + self.duration
    }
}

/// One running transition, owned by a single element.
#[derive(Debug, Clone)]
pub struct Transition {
    element: ElementId,
    direction: Direction,
    spec: TransitionSpec,
    elapsed: Duration,
}

impl Transition {
    pub fn new(element: ElementId, direction: Direction, spec: TransitionSpec) -> Self {
        Self {
            element,
            direction,
            spec,
            elapsed: Duration::ZERO,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock forward. Returns true once the transition has run its course.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.spec.total());
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.spec.total()
    }

    /// Linear progress of the animated part, `0.0` throughout the hold.
    pub fn progress(&self) -> f32 {
        if self.elapsed <= self.spec.hold {
            return if self.spec.duration.is_zero() && self.is_complete() {
                1.0
            } else {
                0.0
            };
        }
        if self.spec.duration.is_zero() {
            return 1.0;
        }
        let animated = (self.elapsed - self.spec.hold).as_secs_f32();
        (animated / self.spec.duration.as_secs_f32()).min(1.0)
    }

    /// Current property value.
    pub fn value(&self) -> f32 {
        let t = self.spec.easing.apply(self.progress());
        self.spec.from + (self.spec.to - self.spec.from) * t
    }

    pub(crate) fn finish(&self, reason: FinishReason) -> TransitionFinished {
        TransitionFinished {
            element: self.element,
            direction: self.direction,
            reason,
            property: self.spec.property,
            value: self.value(),
        }
    }
}
