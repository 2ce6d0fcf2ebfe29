//! UI renderer trait
//!
//! The application hands every display snapshot to a `UIRenderer` as a [`Scene`]. The
//! renderer owns the terminal, so setup and teardown live here as well.

use crate::error::Result;
use crate::render::ui::state::Scene;

/// Draws scenes onto a display surface
pub trait UIRenderer {
    /// Draw one frame: visible layers bottom-up with opacity and offset applied, then
    /// the status line.
    fn render(&mut self, scene: &Scene) -> Result<()>;

    /// Take over the terminal (raw mode, alternate screen, hidden cursor).
    fn initialize(&mut self) -> Result<()>;

    /// Give the terminal back in the state `initialize` found it.
    fn cleanup(&mut self) -> Result<()>;

    /// Surface size as (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::error::DisplayError;

    /// Records every scene it is asked to draw
    pub struct MockUIRenderer {
        pub frames: Vec<Scene>,
        pub surface: (u16, u16),
        pub active: bool,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                frames: Vec::new(),
                surface: (80, 24),
                active: false,
            }
        }

        pub fn resize(&mut self, width: u16, height: u16) {
            self.surface = (width, height);
        }

        pub fn last_frame(&self) -> Option<&Scene> {
            self.frames.last()
        }

        /// Titles of the topmost layer in every recorded frame.
        pub fn top_titles(&self) -> Vec<Option<&str>> {
            self.frames
                .iter()
                .map(|scene| scene.layers.first().map(|layer| layer.panel.title.as_str()))
                .collect()
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, scene: &Scene) -> Result<()> {
            if !self.active {
                return Err(DisplayError::ui("mock renderer drawn before initialize"));
            }
            self.frames.push(scene.clone());
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.active = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.active = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.surface)
        }
    }

    #[test]
    fn mock_records_frames_while_active() {
        use crate::element::Phase;
        use crate::render::ui::state::{Panel, SceneLayer};
        use ratatui::style::Color;

        let mut renderer = MockUIRenderer::new();
        assert!(renderer.render(&Scene::default()).is_err());

        renderer.initialize().unwrap();
        renderer.render(&Scene::default()).unwrap();
        renderer
            .render(&Scene {
                layers: vec![SceneLayer {
                    panel: Panel::new("Inbox", Color::Cyan),
                    opacity: 1.0,
                    offset: 0.0,
                    phase: Phase::Settled,
                }],
                ..Scene::default()
            })
            .unwrap();

        assert_eq!(renderer.top_titles(), vec![None, Some("Inbox")]);
        assert!(renderer.last_frame().is_some());
        renderer.cleanup().unwrap();
        assert!(!renderer.active);
    }

    #[test]
    fn mock_reports_resized_surface() {
        let mut renderer = MockUIRenderer::new();
        renderer.resize(120, 30);
        assert_eq!(renderer.get_terminal_size().unwrap(), (120, 30));
    }
}
