//! Terminal UI implementation using ratatui
//!
//! Draws a [`Scene`] bottom-up. Each layer's colors are blended toward the theme
//! background by its opacity and the layer is shifted by its horizontal offset, so the
//! enter and exit transitions of the display engine show up as fades and slides.

use crate::error::{DisplayError, Result};
use crate::render::ui::state::{Scene, SceneLayer};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Layers below this opacity are not drawn at all.
const MIN_VISIBLE_OPACITY: f32 = 0.02;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    pub fn theme(&self) -> &ColorTheme {
        &self.theme
    }

    /// Draw a whole scene into `frame`.
    pub fn draw_scene(frame: &mut Frame, scene: &Scene, theme: &ColorTheme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.size());
        let (content, status) = (chunks[0], chunks[1]);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            content,
        );
        for layer in scene.visible_layers() {
            Self::draw_layer(frame, content, layer, theme);
        }

        let status_text = scene.status.format_status_line();
        frame.render_widget(
            Paragraph::new(status_text).style(theme.status_style()),
            status,
        );
    }

    fn draw_layer(frame: &mut Frame, bounds: Rect, layer: &SceneLayer, theme: &ColorTheme) {
        if layer.opacity < MIN_VISIBLE_OPACITY {
            return;
        }
        let Some(area) = layer_area(bounds, layer) else {
            return;
        };

        let text = theme.faded(theme.text, layer.opacity);
        let accent = theme.faded(layer.panel.accent, layer.opacity);
        let base = Style::default().bg(theme.background);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(base.fg(accent))
            .title(Span::styled(
                format!(" {} ", layer.panel.title),
                base.fg(accent).add_modifier(Modifier::BOLD),
            ))
            .style(base);
        let lines: Vec<Line> = layer
            .panel
            .lines
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).style(base.fg(text)).block(block), area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(DisplayError::ui("render called before initialize"));
        };
        let theme = &self.theme;
        terminal.draw(move |frame| Self::draw_scene(frame, scene, theme))?;
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, Show)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Where a layer lands inside `bounds`: full size for opaque panels, a centered box for
/// overlays, shifted by the layer offset and clipped.
fn layer_area(bounds: Rect, layer: &SceneLayer) -> Option<Rect> {
    let base = if layer.panel.opaque {
        bounds
    } else {
        centered(bounds, 60, 40)
    };
    shift_clipped(base, layer.offset.round() as i32, bounds)
}

fn centered(bounds: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = bounds.width * percent_x / 100;
    let height = (bounds.height * percent_y / 100).max(3.min(bounds.height));
    Rect::new(
        bounds.x + (bounds.width - width) / 2,
        bounds.y + (bounds.height - height) / 2,
        width,
        height,
    )
}

fn shift_clipped(rect: Rect, dx: i32, bounds: Rect) -> Option<Rect> {
    let left = (rect.x as i32 + dx).max(bounds.x as i32);
    let right = (rect.x as i32 + rect.width as i32 + dx).min(bounds.right() as i32);
    if right <= left || rect.height == 0 {
        return None;
    }
    Some(Rect::new(left as u16, rect.y, (right - left) as u16, rect.height))
}
