//! Display strategy with overlapping enter/exit transitions.
//!
//! Every `show` attaches the new element on top and makes it current before any exit
//! starts, so the idempotency check only ever looks at `current` and can never match
//! an element on its way out. Outgoing elements are recorded in an [`OutgoingTracker`]
//! and detached by the single cleanup path in
//! [`on_transition_finished`](AnimatedDisplayStrategy::on_transition_finished), which
//! runs for completed and cancelled exits alike.
//!
//! A newly entering element is never reconciled with an exiting instance of the same
//! view kind. Both run their own lifecycle independently.

use crate::display::{current_matches, Container, DisplayContext, DisplayStrategy};
use crate::element::{ElementId, Phase, VisualElement};
use crate::error::Result;
use crate::factory::ViewFactory;
use crate::transition::{
    Direction, FinishReason, Property, Timeline, Transition, TransitionFinished, TransitionSpec,
};
use log::{debug, trace};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Elements currently mid-exit. Each id appears at most once.
#[derive(Debug, Default, Clone)]
pub struct OutgoingTracker {
    exiting: BTreeSet<ElementId>,
}

impl OutgoingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `id` was already tracked.
    pub fn insert(&mut self, id: ElementId) -> bool {
        self.exiting.insert(id)
    }

    /// Returns false if `id` was not tracked.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.exiting.remove(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.exiting.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.exiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exiting.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.exiting.iter().copied()
    }
}

/// Animated swap: the new element enters while every other attached element exits.
#[derive(Debug)]
pub struct AnimatedDisplayStrategy<T, V> {
    container: Container<T, V>,
    context: DisplayContext,
    current: Option<ElementId>,
    outgoing: OutgoingTracker,
    timeline: Timeline,
    enter: TransitionSpec,
    exit: TransitionSpec,
}

impl<T, V> AnimatedDisplayStrategy<T, V> {
    pub fn new(context: DisplayContext, enter: TransitionSpec, exit: TransitionSpec) -> Self {
        Self {
            container: Container::new(),
            context,
            current: None,
            outgoing: OutgoingTracker::new(),
            timeline: Timeline::new(),
            enter,
            exit,
        }
    }

    /// Cross-fade: the outgoing element fades out over `duration` while the incoming
    /// one stays transparent for `duration` and then fades in over `duration`.
    ///
    /// Views should stay on screen for at least twice `duration`, otherwise rapid
    /// transitions show several half-faded elements at once.
    pub fn with_fade(context: DisplayContext, duration: Duration) -> Self {
        Self::new(
            context,
            TransitionSpec::fade_in(duration).with_hold(duration),
            TransitionSpec::fade_out(duration),
        )
    }

    pub fn enter_spec(&self) -> &TransitionSpec {
        &self.enter
    }

    pub fn exit_spec(&self) -> &TransitionSpec {
        &self.exit
    }

    pub fn outgoing(&self) -> &OutgoingTracker {
        &self.outgoing
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Single terminal path for every transition this strategy started.
    ///
    /// Exit events remove the element from the tracker and detach it if it is still
    /// attached; repeated or stale events are ignored. Enter events settle the element
    /// unless it has already been sent out. External animation drivers can call this
    /// directly with their own completion or cancellation events.
    pub fn on_transition_finished(&mut self, event: TransitionFinished) {
        match event.direction {
            Direction::Enter => {
                if let Some(element) = self.container.get_mut(event.element) {
                    if element.phase() == Phase::Entering {
                        apply_property(element, event.property, event.value);
                        element.set_phase(Phase::Settled);
                        trace!("element {} settled ({:?})", event.element, event.reason);
                    }
                }
            }
            Direction::Exit => {
                if !self.outgoing.remove(event.element) {
                    trace!("ignoring repeated exit event for {}", event.element);
                    return;
                }
                if self.container.detach(event.element) {
                    debug!("element {} detached ({:?})", event.element, event.reason);
                }
                if self.current == Some(event.element) {
                    self.current = None;
                }
            }
        }
    }

    fn begin_exit(&mut self, id: ElementId, spec: TransitionSpec) {
        if !self.outgoing.insert(id) {
            trace!("element {} already exiting, leaving its transition alone", id);
            return;
        }
        if let Some(element) = self.container.get_mut(id) {
            element.set_phase(Phase::ExitingOut);
            apply_property(element, spec.property, spec.from);
        }
        self.timeline.start(Transition::new(id, Direction::Exit, spec));
    }

    fn pump(&mut self) {
        for event in self.timeline.take_finished() {
            self.on_transition_finished(event);
        }
    }

    fn sync_properties(&mut self) {
        let values: Vec<(ElementId, Property, f32)> = self
            .timeline
            .iter()
            .map(|t| (t.element(), t.spec().property, t.value()))
            .collect();
        for (id, property, value) in values {
            if let Some(element) = self.container.get_mut(id) {
                apply_property(element, property, value);
            }
        }
    }
}

impl<T, V> DisplayStrategy<T, V> for AnimatedDisplayStrategy<T, V> {
    fn already_showing(&self, token: &Arc<T>, factory: &dyn ViewFactory<T, V>) -> Result<bool> {
        current_matches(self.current(), token, factory)
    }

    fn show(&mut self, mut element: VisualElement<T, V>) {
        let id = element.id();
        element.set_phase(Phase::Entering);
        apply_property(&mut element, self.enter.property, self.enter.from);

        self.container.attach_top(element);
        self.current = Some(id);
        self.timeline
            .start(Transition::new(id, Direction::Enter, self.enter));

        let exit = self.exit;
        for other in self.container.ids().into_iter().skip(1) {
            self.begin_exit(other, exit);
        }

        self.pump();
        debug!(
            "showing {} with {} element(s) exiting",
            id,
            self.outgoing.len()
        );
    }

    /// Instantly remove everything. In-flight exits are cancelled; everything else exits
    /// with a zero-length transition.
    fn clear_all(&mut self) {
        self.current = None;
        let instant = TransitionSpec::instant(self.exit.property, self.exit.to);
        let attached = self.container.ids();
        let count = attached.len();

        for id in attached {
            if self.outgoing.contains(id) {
                if !self.timeline.cancel(id) {
                    self.on_transition_finished(TransitionFinished {
                        element: id,
                        direction: Direction::Exit,
                        reason: FinishReason::Cancelled,
                        property: instant.property,
                        value: instant.to,
                    });
                }
            } else {
                self.begin_exit(id, instant);
            }
        }

        self.pump();
        debug!("cleared display, {} element(s) detached", count);
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
        self.current.and_then(|id| self.container.get(id))
    }

    fn advance(&mut self, elapsed: Duration) {
        self.timeline.advance(elapsed);
        self.sync_properties();
        self.pump();
    }

    fn is_settled(&self) -> bool {
        self.timeline.is_idle() && self.outgoing.is_empty()
    }

    fn take_detached(&mut self) -> Vec<VisualElement<T, V>> {
        self.container.take_detached()
    }
}

fn apply_property<T, V>(element: &mut VisualElement<T, V>, property: Property, value: f32) {
    match property {
        Property::Opacity => element.set_opacity(value),
        Property::OffsetX => element.set_offset(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::tests::{token, MockViewFactory, TestKind, TestToken};
    use std::collections::HashMap;

    type Strategy = AnimatedDisplayStrategy<TestToken, String>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn strategy() -> Strategy {
        AnimatedDisplayStrategy::with_fade(DisplayContext::default(), ms(100))
    }

    fn bind(token: &Arc<TestToken>) -> VisualElement<TestToken, String> {
        let factory = MockViewFactory::new();
        VisualElement::bind(
            Arc::clone(token),
            factory.kind_for(token),
            token.label.to_string(),
        )
    }

    fn show(strategy: &mut Strategy, label: &'static str) -> (Arc<TestToken>, ElementId) {
        let token = token(TestKind::Detail, label);
        let element = bind(&token);
        let id = element.id();
        strategy.show(element);
        (token, id)
    }

    fn detach_counts(detached: Vec<VisualElement<TestToken, String>>) -> HashMap<ElementId, usize> {
        let mut counts = HashMap::new();
        for element in detached {
            *counts.entry(element.id()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn new_element_is_current_immediately() {
        let factory = MockViewFactory::new();
        let mut strategy = strategy();
        let (first, first_id) = show(&mut strategy, "first");
        let (second, second_id) = show(&mut strategy, "second");

        assert_eq!(strategy.container().top().map(VisualElement::id), Some(second_id));
        assert_eq!(strategy.current().map(VisualElement::id), Some(second_id));
        assert!(strategy.already_showing(&second, &factory).unwrap());
        assert!(!strategy.already_showing(&first, &factory).unwrap());
        assert!(strategy.outgoing().contains(first_id));
        assert_eq!(
            strategy.container().get(first_id).map(VisualElement::phase),
            Some(Phase::ExitingOut)
        );
    }

    #[test]
    fn enter_settles_after_hold_and_fade() {
        let mut strategy = strategy();
        let (_, id) = show(&mut strategy, "only");

        let element = strategy.current().unwrap();
        assert_eq!(element.phase(), Phase::Entering);
        assert_eq!(element.opacity(), 0.0);

        strategy.advance(ms(150));
        let opacity = strategy.current().unwrap().opacity();
        assert!((opacity - 0.5).abs() < 1e-4, "opacity was {opacity}");

        strategy.advance(ms(50));
        let element = strategy.current().unwrap();
        assert_eq!(element.id(), id);
        assert_eq!(element.phase(), Phase::Settled);
        assert_eq!(element.opacity(), 1.0);
        assert!(strategy.is_settled());
    }

    #[test]
    fn completed_exit_detaches_once() {
        let mut strategy = strategy();
        let (_, first_id) = show(&mut strategy, "first");
        let (_, second_id) = show(&mut strategy, "second");

        strategy.advance(ms(99));
        assert!(strategy.container().contains(first_id));
        strategy.advance(ms(1));
        assert!(!strategy.container().contains(first_id));
        assert!(strategy.outgoing().is_empty());

        strategy.advance(ms(500));
        let counts = detach_counts(strategy.take_detached());
        assert_eq!(counts.get(&first_id), Some(&1));
        assert_eq!(counts.get(&second_id), None);
        assert_eq!(strategy.container().ids(), vec![second_id]);
    }

    #[test]
    fn overlapping_show_does_not_restart_exit() {
        let mut strategy = strategy();
        let (_, first_id) = show(&mut strategy, "first");
        show(&mut strategy, "second");
        strategy.advance(ms(60));

        show(&mut strategy, "third");
        let elapsed = strategy
            .timeline()
            .get(first_id)
            .map(Transition::elapsed);
        assert_eq!(elapsed, Some(ms(60)));
        assert_eq!(strategy.outgoing().len(), 2);

        strategy.advance(ms(40));
        assert!(!strategy.container().contains(first_id));
    }

    #[test]
    fn rapid_burst_leaves_only_last_element() {
        let mut strategy = strategy();
        let ids: Vec<ElementId> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|label| show(&mut strategy, label).1)
            .collect();

        assert_eq!(strategy.container().len(), 5);
        assert_eq!(strategy.current().map(VisualElement::id), Some(ids[4]));
        assert_eq!(strategy.outgoing().len(), 4);

        strategy.advance(ms(1_000));

        assert_eq!(strategy.container().ids(), vec![ids[4]]);
        assert!(strategy.outgoing().is_empty());
        assert!(strategy.is_settled());
        let counts = detach_counts(strategy.take_detached());
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| n == 1));
    }

    #[test]
    fn clear_all_mid_flight_cancels_and_empties() {
        let mut strategy = strategy();
        let ids: Vec<ElementId> = ["a", "b", "c"]
            .into_iter()
            .map(|label| show(&mut strategy, label).1)
            .collect();
        strategy.advance(ms(30));

        strategy.clear_all();

        assert!(strategy.container().is_empty());
        assert!(strategy.outgoing().is_empty());
        assert!(strategy.current().is_none());
        assert!(strategy.timeline().is_idle());

        strategy.advance(ms(1_000));
        let counts = detach_counts(strategy.take_detached());
        assert_eq!(counts.len(), 3);
        for id in ids {
            assert_eq!(counts.get(&id), Some(&1));
        }
    }

    #[test]
    fn clear_all_on_empty_display_is_noop() {
        let mut strategy = strategy();
        strategy.clear_all();
        assert!(strategy.container().is_empty());
        assert!(strategy.take_detached().is_empty());
    }

    #[test]
    fn show_after_clear_starts_fresh() {
        let factory = MockViewFactory::new();
        let mut strategy = strategy();
        show(&mut strategy, "before");
        strategy.clear_all();

        let (token, id) = show(&mut strategy, "after");
        assert_eq!(strategy.container().ids(), vec![id]);
        assert!(strategy.outgoing().is_empty());
        assert!(strategy.already_showing(&token, &factory).unwrap());
    }

    #[test]
    fn external_finish_events_are_idempotent() {
        let mut strategy = strategy();
        let (_, first_id) = show(&mut strategy, "first");
        show(&mut strategy, "second");

        let event = TransitionFinished {
            element: first_id,
            direction: Direction::Exit,
            reason: FinishReason::Cancelled,
            property: Property::Opacity,
            value: 0.4,
        };
        strategy.on_transition_finished(event);
        strategy.on_transition_finished(event);
        assert!(!strategy.container().contains(first_id));

        // The timeline's own completion for the same element arrives later and is ignored.
        strategy.advance(ms(500));
        let counts = detach_counts(strategy.take_detached());
        assert_eq!(counts.get(&first_id), Some(&1));
    }

    #[test]
    fn same_kind_reentry_runs_independently() {
        let mut strategy = strategy();
        let (_, first_id) = show(&mut strategy, "detail");
        let (_, second_id) = show(&mut strategy, "detail-again");

        let kinds: Vec<_> = strategy.container().iter().map(VisualElement::kind).collect();
        assert_eq!(kinds[0], kinds[1]);
        assert_ne!(first_id, second_id);

        strategy.advance(ms(100));
        assert_eq!(strategy.container().ids(), vec![second_id]);
    }

    #[test]
    fn slide_specs_drive_offset() {
        let mut strategy: Strategy = AnimatedDisplayStrategy::new(
            DisplayContext::default(),
            TransitionSpec::slide(20.0, 0.0, ms(100)),
            TransitionSpec::slide(0.0, -20.0, ms(100)),
        );
        let (_, first_id) = show(&mut strategy, "first");
        assert_eq!(strategy.current().unwrap().offset(), 20.0);

        strategy.advance(ms(100));
        assert_eq!(strategy.current().unwrap().offset(), 0.0);

        show(&mut strategy, "second");
        strategy.advance(ms(50));
        let offset = strategy.container().get(first_id).unwrap().offset();
        assert!((offset + 10.0).abs() < 1e-4, "offset was {offset}");
    }
}
