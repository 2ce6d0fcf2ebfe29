//! Scene state handed to the UI renderer
//!
//! A [`Scene`] is a plain snapshot of what the display engine has attached, topmost
//! first, together with the status line. Renderers never see elements or tokens.

use crate::element::Phase;
use ratatui::style::Color;

/// Content of one demo view
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub lines: Vec<String>,
    pub accent: Color,
    /// Full-screen panels hide everything below them once settled
    pub opaque: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>, accent: Color) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            accent,
            opaque: true,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn overlay(mut self) -> Self {
        self.opaque = false;
        self
    }
}

/// A panel with its animated properties at snapshot time
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    pub panel: Panel,
    pub opacity: f32,
    /// Horizontal offset in cells
    pub offset: f32,
    pub phase: Phase,
}

impl SceneLayer {
    /// Whether nothing underneath this layer can show through.
    pub fn covers_below(&self) -> bool {
        self.panel.opaque && self.opacity >= 1.0 && self.offset.abs() < 0.5
    }
}

/// Status line information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    /// Depth of the navigation stack
    pub stack_depth: usize,
    /// Label of the state on top of the stack
    pub current: Option<String>,
    /// Elements still animating out
    pub exiting: usize,
    /// Transient message (errors, hints)
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn format_status_line(&self) -> String {
        let current = self.current.as_deref().unwrap_or("<empty>");
        let mut status = format!("{} | depth {}", current, self.stack_depth);
        if self.exiting > 0 {
            status.push_str(&format!(" | {} exiting", self.exiting));
        }
        if let Some(message) = &self.message {
            status.push_str(" | ");
            status.push_str(message);
        }
        status
    }
}

/// Everything the renderer draws in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Layers topmost first
    pub layers: Vec<SceneLayer>,
    pub status: StatusLine,
}

impl Scene {
    /// Layers that need drawing, bottom-up, skipping those hidden by a covering layer.
    pub fn visible_layers(&self) -> impl Iterator<Item = &SceneLayer> {
        let cutoff = self
            .layers
            .iter()
            .position(SceneLayer::covers_below)
            .map_or(self.layers.len(), |index| index + 1);
        self.layers[..cutoff].iter().rev()
    }
}
