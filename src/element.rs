//! Visual elements: view payloads bound to the token they render.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a visual element for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a fresh, process-wide unique id.
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag naming the kind of view a factory builds for a token.
///
/// Two elements with equal kinds are interchangeable as far as the idempotency check is
/// concerned; which token they are bound to decides the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKind(&'static str);

impl ViewKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Attachment lifecycle of an element.
///
/// `Settled` means no transition is running. Detached elements leave the container
/// entirely, so there is no variant for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Settled,
    ExitingOut,
}

/// A renderable unit bound to exactly one state token.
#[derive(Debug)]
pub struct VisualElement<T, V> {
    id: ElementId,
    kind: ViewKind,
    token: Option<Arc<T>>,
    view: V,
    phase: Phase,
    opacity: f32,
    offset: f32,
}

impl<T, V> VisualElement<T, V> {
    /// Bind a freshly built view to the token it renders.
    pub fn bind(token: Arc<T>, kind: ViewKind, view: V) -> Self {
        Self {
            id: ElementId::next(),
            kind,
            token: Some(token),
            view,
            phase: Phase::Settled,
            opacity: 1.0,
            offset: 0.0,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// The bound token, or `None` once released.
    pub fn token(&self) -> Option<&Arc<T>> {
        self.token.as_ref()
    }

    pub fn has_bound_token(&self) -> bool {
        self.token.is_some()
    }

    /// Drop the binding, handing the token back.
    ///
    /// Only needed when a view outlives the state it was created for (host teardown,
    /// view recycling). A released element must never be the current element again.
    pub fn release_token(&mut self) -> Option<Arc<T>> {
        self.token.take()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current opacity in `[0.0, 1.0]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current horizontal offset in cells (positive shifts right).
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(crate) fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }
}
