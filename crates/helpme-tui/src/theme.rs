//! Theme and Colors
//!
//! A calm sea-and-sand palette. The avatar colors come from the core
//! palette; everything else is chrome.

use ratatui::style::{Color, Modifier, Style};

use helpme_core::AvatarColor;

// ============================================================================
// Shore Palette
// ============================================================================

/// Deep water, the dark background
pub const DEEP_SEA: Color = Color::Rgb(18, 24, 38);

/// Sand, the light background
pub const SAND: Color = Color::Rgb(246, 241, 231);

/// Foam, body text on dark
pub const FOAM: Color = Color::Rgb(232, 236, 241);

/// Ink, body text on light
pub const INK: Color = Color::Rgb(33, 37, 41);

/// Driftwood, secondary text
pub const DRIFTWOOD: Color = Color::Rgb(130, 130, 140);

/// Lagoon, the accent
pub const LAGOON: Color = Color::Rgb(74, 144, 217);

/// Coral, warnings and refused requests
pub const CORAL: Color = Color::Rgb(239, 83, 80);

/// Sunrise, celebrations
pub const SUNRISE: Color = Color::Rgb(255, 167, 38);

/// Seaweed, availability and selection marks
pub const SEAWEED: Color = Color::Rgb(76, 175, 80);

pub fn avatar_color(color: &AvatarColor) -> Color {
    let (r, g, b) = color.rgb;
    Color::Rgb(r, g, b)
}

/// Colors for one of the two modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                bg: DEEP_SEA,
                fg: FOAM,
                muted: DRIFTWOOD,
                accent: LAGOON,
            }
        } else {
            Self {
                bg: SAND,
                fg: INK,
                muted: DRIFTWOOD,
                accent: LAGOON,
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}
