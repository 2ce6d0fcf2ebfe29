//! High-level input service.
//!
//! Consumes crossterm events, maps keys to navigation requests, and yields
//! domain-level `InputAction`s that the application consumes. Consecutive resize
//! events are collapsed into the last one.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Screens the demo can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Inbox,
    Detail,
    Settings,
    /// Partial-screen overlay on top of the current screen.
    Dialog,
}

/// High-level input actions emitted by the service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Push a new state for `screen` onto the navigation stack.
    Push(Screen),
    /// Pop the navigation stack.
    Back,
    /// Push several states in quick succession, before any transition can finish.
    Burst,
    /// Remove everything from the display.
    ClearAll,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key bindings for the demo.
#[derive(Debug, Default)]
pub struct KeyMap;

impl KeyMap {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c') => InputAction::Quit,
                _ => InputAction::InvalidInput,
            };
        }

        match key_event.code {
            KeyCode::Char('h') => InputAction::Push(Screen::Home),
            KeyCode::Char('i') => InputAction::Push(Screen::Inbox),
            KeyCode::Char('d') | KeyCode::Enter => InputAction::Push(Screen::Detail),
            KeyCode::Char('s') => InputAction::Push(Screen::Settings),
            KeyCode::Char('o') => InputAction::Push(Screen::Dialog),
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => InputAction::Back,
            KeyCode::Char(' ') => InputAction::Burst,
            KeyCode::Char('c') => InputAction::ClearAll,
            KeyCode::Char('q') => InputAction::Quit,
            _ => InputAction::InvalidInput,
        }
    }
}

/// Service responsible for producing `InputAction`s from terminal events.
pub struct InputService {
    keys: KeyMap,
    pending: VecDeque<InputAction>,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            keys: KeyMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Wait up to `timeout` for terminal input and return every action it produced.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if event::poll(timeout)? {
            self.enqueue(event::read()?);
            while event::poll(Duration::ZERO)? {
                self.enqueue(event::read()?);
            }
        }
        Ok(self.pending.drain(..).collect())
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.enqueue(event);
        self.pending.drain(..).collect()
    }

    fn enqueue(&mut self, event: Event) {
        let action = match event {
            Event::Key(key_event) => self.keys.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => return,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => {}
            InputAction::Resize { .. }
                if matches!(self.pending.back(), Some(InputAction::Resize { .. })) =>
            {
                if let Some(last) = self.pending.back_mut() {
                    *last = action;
                }
            }
            _ => self.pending.push_back(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the
/// application.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("Input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
