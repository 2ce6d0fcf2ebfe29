//! Input subsystem.
//!
//! Translates crossterm terminal events into navigation actions for the demo front end.

pub mod service;

pub use service::{spawn_input_thread, InputAction, InputService, KeyMap, Screen};
