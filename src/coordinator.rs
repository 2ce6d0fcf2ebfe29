//! Render coordination: capability check, idempotency check, construction, display.

use crate::display::DisplayStrategy;
use crate::element::{ElementId, VisualElement};
use crate::error::{DisplayError, Result};
use crate::factory::ViewFactory;
use crate::registry::CapabilityRegistry;
use crate::token::StateToken;
use log::info;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// What a call to [`RenderCoordinator::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The current element already renders this token; nothing was built.
    AlreadyShowing,
    /// A new element was built and shown.
    Rendered(ElementId),
}

/// Renders state tokens through a factory and a display strategy.
pub struct RenderCoordinator<T: StateToken, V, F, S> {
    registry: CapabilityRegistry<T::Kind>,
    factory: F,
    strategy: S,
    enable_logging: bool,
    _view: PhantomData<fn() -> V>,
}

impl<T, V, F, S> RenderCoordinator<T, V, F, S>
where
    T: StateToken,
    F: ViewFactory<T, V>,
    S: DisplayStrategy<T, V>,
{
    pub fn new(
        handled: impl IntoIterator<Item = T::Kind>,
        factory: F,
        strategy: S,
        enable_logging: bool,
    ) -> Self {
        Self {
            registry: CapabilityRegistry::new(handled),
            factory,
            strategy,
            enable_logging,
            _view: PhantomData,
        }
    }

    pub fn supports(&self, kind: &T::Kind) -> bool {
        self.registry.supports(kind)
    }

    pub fn supports_token(&self, token: &T) -> bool {
        self.supports(&token.kind())
    }

    /// Show `token`, building a view only if the current element does not already
    /// render it.
    ///
    /// # Errors
    /// * `UnsupportedToken` if the token's kind was not declared at construction.
    ///   Callers are expected to check [`supports`](Self::supports) first.
    /// * `InvariantViolation` if the current element lost its bound token.
    pub fn render(&mut self, token: Arc<T>) -> Result<RenderOutcome> {
        self.log(format_args!("render({token:?})"));

        let kind = token.kind();
        if !self.registry.supports(&kind) {
            return Err(DisplayError::unsupported(kind));
        }

        if self.strategy.already_showing(&token, &self.factory)? {
            self.log(format_args!("render({token:?}) already showing"));
            return Ok(RenderOutcome::AlreadyShowing);
        }

        self.log(format_args!("render({token:?}) not showing, adding new view"));
        let view = self
            .factory
            .create_for(&token, self.strategy.display_context());
        let view_kind = self.factory.kind_for(&token);
        let element = VisualElement::bind(token, view_kind, view);
        let id = element.id();
        self.strategy.show(element);
        Ok(RenderOutcome::Rendered(id))
    }

    /// Whether the view for `token` hides everything beneath it. Defaults to true.
    pub fn is_opaque(&self, token: &T) -> bool {
        self.factory.is_opaque(token)
    }

    /// Remove every visible and animating element, e.g. when the host is torn down.
    pub fn clear_all(&mut self) {
        self.log(format_args!("clear_all()"));
        self.strategy.clear_all();
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.strategy.advance(elapsed);
    }

    pub fn is_settled(&self) -> bool {
        self.strategy.is_settled()
    }

    pub fn current(&self) -> Option<&VisualElement<T, V>> {
        self.strategy.current()
    }

    /// Attached elements, topmost first.
    pub fn visible(&self) -> impl Iterator<Item = &VisualElement<T, V>> {
        self.strategy.container().iter()
    }

    pub fn take_detached(&mut self) -> Vec<VisualElement<T, V>> {
        self.strategy.take_detached()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn registry(&self) -> &CapabilityRegistry<T::Kind> {
        &self.registry
    }

    fn log(&self, message: std::fmt::Arguments<'_>) {
        if self.enable_logging {
            info!(target: "pilot_view::render", "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{AnimatedDisplayStrategy, DirectDisplayStrategy, DisplayContext};
    use crate::factory::tests::{token, MockViewFactory, TestKind, TestToken};

    type Direct = DirectDisplayStrategy<TestToken, String>;
    type Animated = AnimatedDisplayStrategy<TestToken, String>;

    const HANDLED: [TestKind; 3] = [TestKind::Home, TestKind::Detail, TestKind::Dialog];

    fn direct() -> RenderCoordinator<TestToken, String, MockViewFactory, Direct> {
        RenderCoordinator::new(
            HANDLED,
            MockViewFactory::new(),
            DirectDisplayStrategy::new(DisplayContext::default()),
            false,
        )
    }

    fn animated() -> RenderCoordinator<TestToken, String, MockViewFactory, Animated> {
        RenderCoordinator::new(
            HANDLED,
            MockViewFactory::new(),
            AnimatedDisplayStrategy::with_fade(DisplayContext::default(), Duration::from_millis(50)),
            true,
        )
    }

    #[test]
    fn repeated_render_builds_once() {
        let mut coordinator = direct();
        let home = token(TestKind::Home, "home");

        let first = coordinator.render(Arc::clone(&home)).unwrap();
        let top_after_first = coordinator.current().map(VisualElement::id);
        let second = coordinator.render(Arc::clone(&home)).unwrap();

        assert!(matches!(first, RenderOutcome::Rendered(_)));
        assert_eq!(second, RenderOutcome::AlreadyShowing);
        assert_eq!(coordinator.factory().created(), 1);
        assert_eq!(coordinator.current().map(VisualElement::id), top_after_first);
    }

    #[test]
    fn repeated_render_builds_once_when_animated() {
        let mut coordinator = animated();
        let home = token(TestKind::Home, "home");

        coordinator.render(Arc::clone(&home)).unwrap();
        assert_eq!(
            coordinator.render(Arc::clone(&home)).unwrap(),
            RenderOutcome::AlreadyShowing
        );
        assert_eq!(coordinator.factory().created(), 1);
        assert_eq!(coordinator.visible().count(), 1);
    }

    #[test]
    fn unsupported_token_fails_without_building() {
        let mut coordinator = direct();
        let hidden = token(TestKind::Hidden, "hidden");

        assert!(!coordinator.supports_token(&hidden));
        let err = coordinator.render(hidden).unwrap_err();

        assert!(matches!(err, DisplayError::UnsupportedToken { .. }));
        assert_eq!(coordinator.factory().created(), 0);
        assert!(coordinator.current().is_none());
    }

    #[test]
    fn rendered_element_is_bound_to_token() {
        let mut coordinator = direct();
        let detail = token(TestKind::Detail, "detail-7");

        let outcome = coordinator.render(Arc::clone(&detail)).unwrap();
        let current = coordinator.current().unwrap();

        assert_eq!(outcome, RenderOutcome::Rendered(current.id()));
        assert_eq!(current.view(), "detail-7");
        assert!(Arc::ptr_eq(current.token().unwrap(), &detail));
    }

    #[test]
    fn new_token_of_same_kind_renders_again() {
        let mut coordinator = direct();
        coordinator.render(token(TestKind::Detail, "a")).unwrap();
        coordinator.render(token(TestKind::Detail, "b")).unwrap();

        assert_eq!(coordinator.factory().created(), 2);
        assert_eq!(coordinator.current().map(|e| e.view().as_str()), Some("b"));
    }

    #[test]
    fn invariant_violation_propagates_from_strategy() {
        let mut coordinator = animated();
        let home = token(TestKind::Home, "home");
        coordinator.render(Arc::clone(&home)).unwrap();

        let mut stale = VisualElement::bind(
            Arc::clone(&home),
            coordinator.factory().kind_for(&home),
            "stale".to_string(),
        );
        stale.release_token();
        coordinator.strategy_mut().show(stale);

        let err = coordinator.render(home).unwrap_err();
        assert!(matches!(err, DisplayError::InvariantViolation { .. }));
        assert_eq!(coordinator.factory().created(), 1);
    }

    #[test]
    fn opacity_is_delegated_to_factory() {
        let coordinator = direct();
        assert!(coordinator.is_opaque(&token(TestKind::Home, "h")));
        assert!(!coordinator.is_opaque(&token(TestKind::Dialog, "d")));
    }

    #[test]
    fn clear_all_then_render_builds_again() {
        let mut coordinator = animated();
        let home = token(TestKind::Home, "home");
        coordinator.render(Arc::clone(&home)).unwrap();

        coordinator.clear_all();
        assert_eq!(coordinator.visible().count(), 0);
        assert!(coordinator.is_settled());
        assert_eq!(coordinator.take_detached().len(), 1);

        coordinator.render(home).unwrap();
        assert_eq!(coordinator.factory().created(), 2);
    }

    #[test]
    fn boxed_strategy_works_as_trait_object() {
        let mut coordinator: RenderCoordinator<_, String, _, Box<dyn DisplayStrategy<TestToken, String>>> =
            RenderCoordinator::new(
                HANDLED,
                MockViewFactory::new(),
                Box::new(DirectDisplayStrategy::new(DisplayContext::default())),
                false,
            );

        coordinator.render(token(TestKind::Home, "home")).unwrap();
        assert_eq!(coordinator.visible().count(), 1);
    }
}
