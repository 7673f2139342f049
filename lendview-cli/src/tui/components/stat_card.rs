//! Stat Card Widget
//!
//! Title/value cards for the action card body, plus a one-line variant.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::super::theme::theme;

/// A stat card displaying a title and value.
pub struct StatCard<'a> {
    title: &'a str,
    value: &'a str,
    value_color: Color,
    highlighted: bool,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            value_color: theme().text_primary,
            highlighted: false,
        }
    }

    pub fn value_color(mut self, color: Color) -> Self {
        self.value_color = color;
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let border_style = if self.highlighted {
            t.border_active()
        } else {
            t.border_inactive()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(t.bg());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.title)
                .style(t.subtitle())
                .alignment(Alignment::Left),
            content[0],
        );

        frame.render_widget(
            Paragraph::new(self.value)
                .style(Style::default().fg(self.value_color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Left),
            content[1],
        );
    }
}

/// A compact inline stat display (label: value).
pub struct InlineStat<'a> {
    label: &'a str,
    value: &'a str,
    value_color: Color,
}

impl<'a> InlineStat<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            value_color: theme().text_primary,
        }
    }

    pub fn value_color(mut self, color: Color) -> Self {
        self.value_color = color;
        self
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(self.label, Style::default().fg(theme().text_muted)),
            Span::raw(" "),
            Span::styled(self.value, Style::default().fg(self.value_color).add_modifier(Modifier::BOLD)),
        ])
    }
}
