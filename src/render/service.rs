use crate::coordinator::{RenderCoordinator, RenderOutcome};
use crate::display::DisplayStrategy;
use crate::element::{ElementId, Phase};
use crate::factory::ViewFactory;
use crate::render::protocol::{
    DisplayCommand, DisplayResponse, DisplaySnapshot, LayerSnapshot, RequestId,
};
use crate::token::StateToken;
use log::{debug, error};
use ratatui::layout::Rect;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the display loop, processing commands from the application in order.
///
/// The loop ends on `Shutdown`, when either channel closes, or after reporting a fatal
/// error.
pub async fn display_loop<T, V, F, S>(
    mut rx: Receiver<DisplayCommand<T>>,
    tx: Sender<DisplayResponse<V>>,
    coordinator: RenderCoordinator<T, V, F, S>,
) where
    T: StateToken,
    V: Clone,
    F: ViewFactory<T, V>,
    S: DisplayStrategy<T, V>,
{
    let mut state = LoopState { coordinator };

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd);
        for response in outcome.responses {
            if tx.send(response).await.is_err() {
                return;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct LoopState<T: StateToken, V, F, S> {
    coordinator: RenderCoordinator<T, V, F, S>,
}

impl<T, V, F, S> LoopState<T, V, F, S>
where
    T: StateToken,
    V: Clone,
    F: ViewFactory<T, V>,
    S: DisplayStrategy<T, V>,
{
    fn handle_command(&mut self, cmd: DisplayCommand<T>) -> HandlerOutcome<V> {
        let mut outcome = match cmd {
            DisplayCommand::Render { request_id, token } => self.render(request_id, token),
            DisplayCommand::ClearAll { request_id } => {
                self.coordinator.clear_all();
                HandlerOutcome::respond(DisplayResponse::Cleared { request_id })
            }
            DisplayCommand::Advance(elapsed) => {
                self.coordinator.advance(elapsed);
                HandlerOutcome::continue_without_response()
            }
            DisplayCommand::Resize { width, height } => {
                let strategy = self.coordinator.strategy_mut();
                let mut context = strategy.display_context().clone();
                context.area = Rect::new(0, 0, width, height);
                strategy.set_display_context(context);
                HandlerOutcome::continue_without_response()
            }
            DisplayCommand::Snapshot { request_id } => {
                HandlerOutcome::respond(DisplayResponse::Snapshot {
                    request_id,
                    snapshot: self.snapshot(),
                })
            }
            DisplayCommand::Shutdown => HandlerOutcome::exit(),
        };

        let detached: Vec<ElementId> = self
            .coordinator
            .take_detached()
            .iter()
            .map(|element| element.id())
            .collect();
        if !detached.is_empty() {
            debug!("detached {} element(s): {:?}", detached.len(), detached);
            outcome.push(DisplayResponse::Detached(detached));
        }
        outcome
    }

    fn render(&mut self, request_id: RequestId, token: Arc<T>) -> HandlerOutcome<V> {
        match self.coordinator.render(token) {
            Ok(RenderOutcome::Rendered(element)) => {
                HandlerOutcome::respond(DisplayResponse::Rendered {
                    request_id,
                    element,
                })
            }
            Ok(RenderOutcome::AlreadyShowing) => {
                HandlerOutcome::respond(DisplayResponse::AlreadyShowing { request_id })
            }
            Err(error) if error.is_fatal() => {
                error!("display loop stopping: {error}");
                HandlerOutcome::exit_with(DisplayResponse::Error {
                    request_id: Some(request_id),
                    error,
                })
            }
            Err(error) => HandlerOutcome::respond(DisplayResponse::Error {
                request_id: Some(request_id),
                error,
            }),
        }
    }

    fn snapshot(&self) -> DisplaySnapshot<V> {
        let layers: Vec<LayerSnapshot<V>> = self
            .coordinator
            .visible()
            .map(|element| LayerSnapshot {
                id: element.id(),
                kind: element.kind(),
                phase: element.phase(),
                opacity: element.opacity(),
                offset: element.offset(),
                opaque: element
                    .token()
                    .map_or(true, |token| self.coordinator.is_opaque(token)),
                view: element.view().clone(),
            })
            .collect();
        let exiting = layers
            .iter()
            .filter(|layer| layer.phase == Phase::ExitingOut)
            .count();

        DisplaySnapshot {
            layers,
            current: self.coordinator.current().map(|element| element.id()),
            exiting,
            settled: self.coordinator.is_settled(),
        }
    }
}

struct HandlerOutcome<V> {
    responses: Vec<DisplayResponse<V>>,
    done: bool,
}

impl<V> HandlerOutcome<V> {
    fn respond(response: DisplayResponse<V>) -> Self {
        Self {
            responses: vec![response],
            done: false,
        }
    }

    fn continue_without_response() -> Self {
        Self {
            responses: Vec::new(),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            responses: Vec::new(),
            done: true,
        }
    }

    fn exit_with(response: DisplayResponse<V>) -> Self {
        Self {
            responses: vec![response],
            done: true,
        }
    }

    fn push(&mut self, response: DisplayResponse<V>) {
        self.responses.push(response);
    }
}
