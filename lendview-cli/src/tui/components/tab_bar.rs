//! Two-way tab switcher used by both the market card and the action card.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::super::theme::theme;

pub struct TabBar<'a> {
    labels: [&'a str; 2],
    active: usize,
    hotkeys: Option<[&'a str; 2]>,
}

impl<'a> TabBar<'a> {
    pub fn new(labels: [&'a str; 2], active: usize) -> Self {
        Self {
            labels,
            active: active.min(1),
            hotkeys: None,
        }
    }

    /// Shows a key hint such as `[1]` in front of each label.
    pub fn hotkeys(mut self, hotkeys: [&'a str; 2]) -> Self {
        self.hotkeys = Some(hotkeys);
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (i, label) in self.labels.iter().enumerate() {
            let is_active = i == self.active;
            let style = if is_active { t.highlight() } else { t.tab_idle() };
            let border_style = if is_active { t.border_active() } else { t.border_inactive() };

            let text = match self.hotkeys {
                Some(keys) => format!("[{}] {}", keys[i], label),
                None => label.to_string(),
            };

            let tab = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                );
            frame.render_widget(tab, halves[i]);
        }
    }
}
