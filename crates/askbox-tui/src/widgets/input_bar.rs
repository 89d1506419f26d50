//! Input bar widget.
//!
//! Always visible at the bottom of the screen. Grows with multi-line
//! drafts and keeps the cursor in view by scrolling both ways.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::conversation::placeholder::input_placeholder;
use crate::theme::Theme;
use crate::ui::widgets::TextInputState;

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const CURSOR: &str = "█";

/// Input bar for composing the draft.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    busy: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            busy: false,
        }
    }

    /// Show the sending state. Typing stays enabled.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Build display lines and the index of the line holding the cursor.
    fn build_lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let prompt_style = Style::default().fg(self.theme.primary);
        let cursor_style = Style::default().fg(self.theme.text);

        if self.input.is_empty() {
            let line = Line::from(vec![
                Span::styled(PROMPT, prompt_style),
                Span::styled(CURSOR, cursor_style),
                Span::styled(
                    input_placeholder(self.busy),
                    Style::default().fg(self.theme.muted),
                ),
            ]);
            return (vec![line], 0);
        }

        let (cursor_line, cursor_col) = self.input.cursor_line_col();
        // prompt and cursor block take three columns
        let room = width.saturating_sub(PROMPT.width() + 1).max(1);

        let lines = self
            .input
            .content()
            .split('\n')
            .enumerate()
            .map(|(idx, text)| {
                let prefix = if idx == 0 { PROMPT } else { CONTINUATION };
                let mut spans = vec![Span::styled(prefix, prompt_style)];

                if idx == cursor_line {
                    let chars: Vec<char> = text.chars().collect();
                    let start = visible_start(&chars[..cursor_col], room);
                    let before: String = chars[start..cursor_col].iter().collect();
                    let after: String = chars[cursor_col..].iter().collect();
                    spans.push(Span::raw(before));
                    spans.push(Span::styled(CURSOR, cursor_style));
                    spans.push(Span::raw(after));
                } else {
                    spans.push(Span::raw(text.to_string()));
                }
                Line::from(spans)
            })
            .collect();

        (lines, cursor_line)
    }
}

/// First char index that keeps `before` within `room` columns.
fn visible_start(before: &[char], room: usize) -> usize {
    let mut width = 0;
    for (i, ch) in before.iter().enumerate().rev() {
        width += ch.width().unwrap_or(0);
        if width > room {
            return i + 1;
        }
    }
    0
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.busy {
            Line::styled(
                " Sending... ",
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Line::styled(" Message ", Style::default().fg(self.theme.muted))
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        let inner_height = usize::from(inner.height);
        let (lines, cursor_line) = self.build_lines(usize::from(inner.width));

        // keep the cursor line visible, pinned to the bottom if needed
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInputState, busy: bool, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme).busy(busy).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_input_shows_placeholder() {
        let output = render(&TextInputState::new(), false, 50, 3);
        assert!(output.contains("> █Ask me anything..."));
        assert!(output.contains("Message"));
    }

    #[test]
    fn test_busy_title_and_placeholder() {
        let output = render(&TextInputState::new(), true, 70, 3);
        assert!(output.contains("Sending..."));
        assert!(output.contains("Waiting for the answer"));
    }

    #[test]
    fn test_cursor_drawn_inside_text() {
        let mut input = TextInputState::new();
        input.insert_str("hello");
        input.move_left();
        input.move_left();

        let output = render(&input, false, 40, 3);
        assert!(output.contains("> hel█lo"));
    }

    #[test]
    fn test_busy_input_keeps_draft_visible() {
        let mut input = TextInputState::new();
        input.insert_str("next question");

        let output = render(&input, true, 40, 3);
        assert!(output.contains("> next question█"));
        assert!(output.contains("Sending..."));
    }

    #[test]
    fn test_multiline_draft_uses_continuation_prefix() {
        let mut input = TextInputState::new();
        input.insert_str("first\nsecond");

        let output = render(&input, false, 40, 4);
        assert!(output.contains("> first"));
        assert!(output.contains("  second█"));
    }

    #[test]
    fn test_long_line_scrolls_to_cursor() {
        let mut input = TextInputState::new();
        input.insert_str(&"x".repeat(30));
        input.insert_str("END");

        let output = render(&input, false, 20, 3);
        assert!(output.contains("END█"));
    }

    #[test]
    fn test_tall_draft_scrolls_to_cursor_line() {
        let mut input = TextInputState::new();
        input.insert_str("l1\nl2\nl3\nl4");

        let output = render(&input, false, 20, 4);
        assert!(output.contains("l4█"));
        assert!(!output.contains("l1"));
    }

    #[test]
    fn test_visible_start_accounts_for_wide_chars() {
        let chars: Vec<char> = "你好世界".chars().collect();
        assert_eq!(visible_start(&chars, 8), 0);
        assert_eq!(visible_start(&chars, 4), 2);
    }
}
