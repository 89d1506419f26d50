//! Footer keybinding hints.
//!
//! Format: `3 messages            [Enter] send │ [Ctrl+J] newline │ [F1] help`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+J").
    pub key: String,
    /// The action description (e.g., "send", "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer bar: status text on the left, hints on the right.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    status: Option<&'a str>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            status: None,
        }
    }

    /// Set the status text shown on the left.
    #[must_use]
    pub fn status(mut self, status: &'a str) -> Self {
        self.status = Some(status);
        self
    }

    /// Hints for the chat screen.
    ///
    /// `keyboard_enhanced` indicates whether the terminal reports modified
    /// Enter. Without it Ctrl+J is the reliable newline key.
    pub fn chat_hints(keyboard_enhanced: bool) -> Vec<KeyHint> {
        let newline_hint = if keyboard_enhanced {
            KeyHint::new("Shift+Enter", "newline")
        } else {
            KeyHint::new("Ctrl+J", "newline")
        };
        vec![
            KeyHint::new("Enter", "send"),
            newline_hint,
            KeyHint::new("F1", "help"),
            KeyHint::new("Esc", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(status) = self.status {
            left_spans.push(Span::styled(
                format!(" {status}"),
                Style::default().fg(self.theme.muted),
            ));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.key.as_str(),
                Style::default().fg(self.theme.primary),
            ));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.action.as_str(),
                Style::default().fg(self.theme.text),
            ));
        }
        right_spans.push(Span::raw(" "));

        let left_width: usize = left_spans.iter().map(Span::width).sum();
        let right_width: usize = right_spans.iter().map(Span::width).sum();
        let total_width = usize::from(area.width);

        // drop the status before the hints when space runs out
        if left_width + right_width > total_width {
            left_spans.clear();
        } else {
            left_spans.push(Span::raw(
                " ".repeat(total_width - left_width - right_width),
            ));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
