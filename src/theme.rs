//! Light/dark palettes. The active theme lives on `App` and is toggled at
//! runtime; it is never persisted, so every run starts from the configured
//! default.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    // Palette

    pub fn bg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(16, 16, 20),
            Theme::Light => Color::Rgb(240, 240, 235),
        }
    }

    pub fn fg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(215, 215, 215),
            Theme::Light => Color::Rgb(40, 40, 45),
        }
    }

    /// Accent used for section titles and reply text; the status area
    /// recolors with this when the theme flips.
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::Blue,
        }
    }

    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::DarkGray,
            Theme::Light => Color::Gray,
        }
    }

    pub fn error(self) -> Color {
        match self {
            Theme::Dark => Color::LightRed,
            Theme::Light => Color::Red,
        }
    }

    // Common styles

    pub fn body(self) -> Style {
        Style::default().bg(self.bg()).fg(self.fg())
    }

    pub fn heading(self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub fn nav_active(self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub fn nav_inactive(self) -> Style {
        Style::default().fg(self.muted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_theme() {
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
}
