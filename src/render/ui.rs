//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the scene
//! structures it draws and the styling utilities.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{Panel, Scene, SceneLayer, StatusLine};
pub use terminal::TerminalUI;
pub use theme::{blend, ColorTheme};

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;

pub use ratatui::style::{Color, Style};
