//! Dashboard Theme
//!
//! Blue accent on a dark navy background, green for positive values and the
//! wallet buttons.

use ratatui::style::{Color, Modifier, Style};

/// The main theme struct containing all colors and pre-computed styles.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Brand blue - active tabs and focused borders
    pub blue: Color,
    /// Green - positive values and wallet buttons
    pub green: Color,
    /// Navy - main background
    pub navy: Color,
    /// Lighter navy - panels and inactive tabs
    pub navy_light: Color,

    /// Primary text color (near-white)
    pub text_primary: Color,
    /// Muted/secondary text color
    pub text_muted: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            blue: Color::Rgb(39, 126, 230),
            green: Color::Rgb(32, 201, 151),
            navy: Color::Rgb(9, 16, 34),
            navy_light: Color::Rgb(27, 37, 62),
            text_primary: Color::Rgb(241, 245, 249),
            text_muted: Color::Rgb(136, 148, 171),
            error: Color::Rgb(233, 63, 89),
            warning: Color::Rgb(247, 181, 0),
            success: Color::Rgb(32, 201, 151),
            accent: Color::Cyan,
        }
    }
}

impl Theme {
    /// Title style - bold blue text
    pub fn title(&self) -> Style {
        Style::default().fg(self.blue).add_modifier(Modifier::BOLD)
    }

    /// Subtitle/label style - muted text
    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Active tab / selected row
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.blue)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive tab
    pub fn tab_idle(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.navy_light)
    }

    pub fn border_active(&self) -> Style {
        Style::default().fg(self.blue)
    }

    pub fn border_inactive(&self) -> Style {
        Style::default().fg(self.navy_light)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Background style for main area
    pub fn bg(&self) -> Style {
        Style::default().bg(self.navy)
    }

    /// Value display style - bold primary text
    pub fn value(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Positive value style - bold green
    pub fn value_positive(&self) -> Style {
        Style::default().fg(self.green).add_modifier(Modifier::BOLD)
    }
}

pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Convenience function to get the default theme.
pub fn theme() -> &'static Theme {
    &THEME
}

/// Icons used throughout the TUI
pub mod icons {
    pub const BANK: &str = "🏦";
    pub const WALLET: &str = "👛";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const ADD: &str = "+";
    pub const ARROW_RIGHT: &str = "➜";
    pub const SEPARATOR: &str = "│";
    pub const TOGGLE_ON: &str = "◉";
    pub const TOGGLE_OFF: &str = "○";

    // Spinner frames for loading animation
    pub const SPINNER: &[&str] = &["◐", "◓", "◑", "◒"];
}
