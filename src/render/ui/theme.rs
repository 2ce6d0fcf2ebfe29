//! Color theme and styling definitions using ratatui colors
//!
//! Themes are handed to view factories through the display context, and the terminal
//! front end uses them to fade layers in and out by blending toward the background.

use ratatui::style::{Color, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Surface background that fading layers blend toward
    pub background: Color,

    /// Body text of views
    pub text: Color,

    /// Frame around each view
    pub border: Color,

    /// Titles and highlights
    pub accent: Color,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error/warning text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(24, 24, 32),
            text: Color::Rgb(220, 220, 228),
            border: Color::Rgb(96, 104, 140),
            accent: Color::Rgb(120, 180, 255),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            border: Color::Gray,
            accent: Color::White,
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            border: Color::LightYellow,
            accent: Color::LightCyan,
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }

    /// `color` as seen at `opacity` over this theme's background.
    pub fn faded(&self, color: Color, opacity: f32) -> Color {
        blend(color, self.background, opacity)
    }
}

/// Mix `fg` over `bg` at `opacity`.
///
/// Palette colors have no exact RGB value in every terminal, so they are approximated
/// with the xterm defaults; anything else snaps to whichever side dominates.
pub fn blend(fg: Color, bg: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity >= 1.0 {
        return fg;
    }
    if opacity <= 0.0 {
        return bg;
    }
    match (to_rgb(fg), to_rgb(bg)) {
        (Some(f), Some(b)) => {
            let mix = |f: u8, b: u8| (b as f32 + (f as f32 - b as f32) * opacity).round() as u8;
            Color::Rgb(mix(f.0, b.0), mix(f.1, b.1), mix(f.2, b.2))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        _ => return None,
    };
    Some(rgb)
}
