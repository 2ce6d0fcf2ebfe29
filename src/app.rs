//! Application orchestration layer
//!
//! The application owns the demo navigation stack and the terminal. The display engine
//! runs in its own task ([`display_loop`]); the application sends it render commands as
//! the user navigates, ticks it forward on a fixed interval, and draws every snapshot it
//! gets back.

pub mod demo;

pub use demo::{DemoKind, DemoToken, DemoViewFactory};

use crate::config::DisplayConfig;
use crate::coordinator::RenderCoordinator;
use crate::display::DisplayContext;
use crate::error::{DisplayError, Result};
use crate::input::{spawn_input_thread, InputAction, Screen};
use crate::render::display_loop;
use crate::render::protocol::{DisplayCommand, DisplayResponse, DisplaySnapshot, RequestId};
use crate::render::ui::{Panel, Scene, SceneLayer, StatusLine, UIRenderer};
use log::debug;
use ratatui::layout::Rect;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Sender, UnboundedReceiver};
use tokio::time::{interval, Instant, MissedTickBehavior};

const COMMAND_CHANNEL_CAPACITY: usize = 256;
/// Screens pushed by a single burst, faster than any transition can finish.
const BURST: [Screen; 5] = [
    Screen::Inbox,
    Screen::Detail,
    Screen::Detail,
    Screen::Settings,
    Screen::Detail,
];
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Application orchestrator
pub struct Application {
    config: DisplayConfig,
    ui_renderer: Box<dyn UIRenderer>,
    /// Navigation stack, bottom first
    stack: Vec<Arc<DemoToken>>,
    next_request_id: RequestId,
    next_serial: u64,
    snapshot: DisplaySnapshot<Panel>,
    message: Option<String>,
}

impl Application {
    pub fn new(config: DisplayConfig, ui_renderer: Box<dyn UIRenderer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ui_renderer,
            stack: Vec::new(),
            next_request_id: 1,
            next_serial: 1,
            snapshot: DisplaySnapshot::default(),
            message: None,
        })
    }

    /// Run with terminal input until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread =
            spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        // Exits on its own within one poll interval.
        drop(input_thread);
        result
    }

    /// Run the event loop, taking actions from `input` instead of the terminal.
    pub async fn run_with_input(&mut self, mut input: UnboundedReceiver<InputAction>) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let context = DisplayContext::new(
            Rect::new(0, 0, width, height),
            self.config.color_theme(),
        );
        let coordinator: RenderCoordinator<DemoToken, Panel, _, _> = RenderCoordinator::new(
            DemoKind::ALL,
            DemoViewFactory,
            self.config.build_strategy::<DemoToken, Panel>(context),
            self.config.enable_logging,
        );

        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (resp_tx, mut resp_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let display = tokio::spawn(display_loop(cmd_rx, resp_tx, coordinator));

        let result = self.event_loop(&cmd_tx, &mut input, &mut resp_rx).await;

        let _ = cmd_tx.send(DisplayCommand::Shutdown).await;
        let _ = display.await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        cmd_tx: &Sender<DisplayCommand<DemoToken>>,
        input: &mut UnboundedReceiver<InputAction>,
        responses: &mut mpsc::Receiver<DisplayResponse<Panel>>,
    ) -> Result<()> {
        self.push(cmd_tx, Screen::Home).await?;

        let mut ticker = interval(self.config.tick());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                now = ticker.tick() => {
                    let elapsed = now.duration_since(last_tick);
                    last_tick = now;
                    self.send(cmd_tx, DisplayCommand::Advance(elapsed)).await?;
                    let request_id = self.next_request_id();
                    self.send(cmd_tx, DisplayCommand::Snapshot { request_id }).await?;
                }
                action = input.recv() => {
                    let Some(action) = action else { return Ok(()) };
                    if !self.handle_action(cmd_tx, action).await? {
                        return Ok(());
                    }
                }
                response = responses.recv() => {
                    let Some(response) = response else {
                        return Err(DisplayError::other("display loop stopped"));
                    };
                    self.handle_response(response)?;
                }
            }
        }
    }

    /// Apply one input action. Returns false when the application should quit.
    async fn handle_action(
        &mut self,
        cmd_tx: &Sender<DisplayCommand<DemoToken>>,
        action: InputAction,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => return Ok(false),
            InputAction::Push(screen) => self.push(cmd_tx, screen).await?,
            InputAction::Back => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                    self.render_top(cmd_tx).await?;
                } else {
                    self.message = Some("already at the root".to_string());
                }
            }
            InputAction::Burst => {
                for screen in BURST {
                    self.push(cmd_tx, screen).await?;
                }
            }
            InputAction::ClearAll => {
                self.stack.clear();
                self.message = Some("cleared, press h for home".to_string());
                let request_id = self.next_request_id();
                self.send(cmd_tx, DisplayCommand::ClearAll { request_id })
                    .await?;
            }
            InputAction::Resize { width, height } => {
                self.send(cmd_tx, DisplayCommand::Resize { width, height })
                    .await?;
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        Ok(true)
    }

    fn handle_response(&mut self, response: DisplayResponse<Panel>) -> Result<()> {
        match response {
            DisplayResponse::Snapshot { snapshot, .. } => {
                self.snapshot = snapshot;
                let scene = self.scene();
                self.ui_renderer.render(&scene)?;
            }
            DisplayResponse::Rendered {
                request_id,
                element,
            } => {
                debug!("request {request_id} rendered as {element}");
                self.message = None;
            }
            DisplayResponse::AlreadyShowing { request_id } => {
                debug!("request {request_id} was already showing");
            }
            DisplayResponse::Cleared { request_id } => {
                debug!("request {request_id} cleared the display");
            }
            DisplayResponse::Detached(ids) => {
                debug!("detached {ids:?}");
            }
            DisplayResponse::Error { error, .. } => {
                if error.is_fatal() {
                    return Err(error);
                }
                self.message = Some(error.to_string());
            }
        }
        Ok(())
    }

    async fn push(
        &mut self,
        cmd_tx: &Sender<DisplayCommand<DemoToken>>,
        screen: Screen,
    ) -> Result<()> {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.stack.push(DemoToken::new(screen.into(), serial));
        self.render_top(cmd_tx).await
    }

    async fn render_top(&mut self, cmd_tx: &Sender<DisplayCommand<DemoToken>>) -> Result<()> {
        let Some(token) = self.stack.last().map(Arc::clone) else {
            return Ok(());
        };
        let request_id = self.next_request_id();
        self.send(cmd_tx, DisplayCommand::Render { request_id, token })
            .await
    }

    async fn send(
        &self,
        cmd_tx: &Sender<DisplayCommand<DemoToken>>,
        command: DisplayCommand<DemoToken>,
    ) -> Result<()> {
        cmd_tx
            .send(command)
            .await
            .map_err(|_| DisplayError::other("display loop unavailable"))
    }

    fn next_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Build the frame for the latest snapshot.
    fn scene(&self) -> Scene {
        let layers = self
            .snapshot
            .layers
            .iter()
            .map(|layer| {
                let mut panel = layer.view.clone();
                panel.opaque = layer.opaque;
                SceneLayer {
                    panel,
                    opacity: layer.opacity,
                    offset: layer.offset,
                    phase: layer.phase,
                }
            })
            .collect();

        Scene {
            layers,
            status: StatusLine {
                stack_depth: self.stack.len(),
                current: self.stack.last().map(|token| token.title()),
                exiting: self.snapshot.exiting,
                message: self.message.clone(),
            },
        }
    }
}
