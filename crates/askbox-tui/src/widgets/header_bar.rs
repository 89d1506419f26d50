//! Header bar for the top of the chat screen.
//!
//! Format: `● JinggStack AI │ Chat Assistant            localhost:5000`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

/// Header bar widget.
pub struct HeaderBar<'a> {
    assistant_name: &'a str,
    endpoint: Option<&'a str>,
    busy: bool,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(assistant_name: &'a str, theme: &'a Theme) -> Self {
        Self {
            assistant_name,
            endpoint: None,
            busy: false,
            theme,
        }
    }

    /// Service address shown on the right.
    #[must_use]
    pub fn endpoint(mut self, endpoint: &'a str) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        let dot_color = if self.busy {
            self.theme.primary
        } else {
            self.theme.user
        };
        let status = if self.busy { "Thinking" } else { "Chat Assistant" };

        let mut spans = vec![
            Span::styled(" ● ", Style::default().fg(dot_color)),
            Span::styled(
                self.assistant_name,
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(self.theme.muted)),
            Span::styled(status, Style::default().fg(self.theme.text)),
        ];

        if let Some(endpoint) = self.endpoint {
            let used: usize = spans.iter().map(Span::width).sum();
            let wanted = endpoint.chars().count() + 1;
            let width = usize::from(inner.width);
            if used + wanted <= width {
                spans.push(Span::raw(" ".repeat(width - used - wanted)));
                spans.push(Span::styled(endpoint, Style::default().fg(self.theme.muted)));
            }
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
