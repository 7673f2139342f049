//! Loading Spinner Widget
//!
//! Shown by the action card until an asset has been selected.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use super::super::theme::{icons, theme};

/// A loading spinner with a message underneath.
pub struct LoadingSpinner<'a> {
    message: &'a str,
    /// Frame index for animation
    frame: usize,
}

impl<'a> LoadingSpinner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message, frame: 0 }
    }

    /// Set the animation frame; wraps around the spinner glyphs.
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame % icons::SPINNER.len();
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let v_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(1), // Spinner
                Constraint::Length(1), // Space
                Constraint::Length(1), // Message
                Constraint::Percentage(35),
            ])
            .split(area);

        let spinner = Paragraph::new(icons::SPINNER[self.frame])
            .style(Style::default().fg(t.blue).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(spinner, v_layout[1]);

        let message = Paragraph::new(self.message)
            .style(t.subtitle())
            .alignment(Alignment::Center);
        frame.render_widget(message, v_layout[3]);
    }
}
