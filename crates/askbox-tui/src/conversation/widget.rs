//! Conversation pane widget.
//!
//! Renders [`ConversationState::view_items`] as a transcript:
//!
//! ```text
//! ┌ Conversation ────────────────────────────────┐
//! │                                   You 14:02 │
//! │                      what is a closure? │   │
//! │                                              │
//! │ JinggStack AI 14:02                          │
//! │ │ A function that captures its               │
//! │ │ environment.                               │
//! │                                              │
//! │ JinggStack AI ●∙∙ Thinking...                │
//! └──────────────────────────────────────────────┘
//! ```

use askbox_engine::{ConversationState, Message, Sender, ViewItem};
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

use super::placeholder::{welcome_title, WELCOME_BODY};
use super::scroll::ScrollAnchor;

/// Thinking indicator frames, advanced once per tick.
const SPINNER: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

/// Message bubbles take at most this share of the pane width.
const BUBBLE_PERCENT: usize = 75;

/// Narrowest bubble before wrapping gets unreadable.
const MIN_BUBBLE_WIDTH: usize = 20;

fn bubble_width(width: u16) -> usize {
    let width = usize::from(width);
    (width * BUBBLE_PERCENT / 100)
        .max(MIN_BUBBLE_WIDTH)
        .min(width)
        .max(1)
}

/// Build the transcript lines for the given view items.
pub fn transcript_lines(
    items: &[ViewItem<'_>],
    width: u16,
    theme: &Theme,
    assistant_name: &str,
    tick: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        match item {
            ViewItem::Welcome => welcome_lines(&mut lines, width, theme, assistant_name),
            ViewItem::Message(message) => {
                message_lines(&mut lines, message, width, theme, assistant_name);
            }
            ViewItem::Thinking => lines.push(thinking_line(theme, assistant_name, tick)),
        }
    }
    lines
}

fn welcome_lines(lines: &mut Vec<Line<'static>>, width: u16, theme: &Theme, name: &str) {
    lines.push(
        Line::styled(
            welcome_title(name),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center),
    );
    lines.push(Line::default());
    for row in textwrap::wrap(WELCOME_BODY, bubble_width(width)) {
        lines.push(
            Line::styled(row.into_owned(), Style::default().fg(theme.muted))
                .alignment(Alignment::Center),
        );
    }
}

fn message_lines(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    width: u16,
    theme: &Theme,
    assistant_name: &str,
) {
    let (name, color, alignment) = match message.sender() {
        Sender::User => (Sender::User.label(), theme.user, Alignment::Right),
        Sender::Bot => (assistant_name, theme.bot, Alignment::Left),
    };
    let time = message
        .sent_at()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    lines.push(
        Line::from(vec![
            Span::styled(
                name.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {time}"), Style::default().fg(theme.muted)),
        ])
        .alignment(alignment),
    );

    // two columns for the bar and its gap
    let text_width = bubble_width(width).saturating_sub(2).max(1);
    let bar = Span::styled("│", Style::default().fg(color));
    let text_style = Style::default().fg(theme.text);

    for row in textwrap::wrap(message.text(), text_width) {
        let text = Span::styled(row.into_owned(), text_style);
        let line = match message.sender() {
            Sender::User => Line::from(vec![text, Span::raw(" "), bar.clone()]),
            Sender::Bot => Line::from(vec![bar.clone(), Span::raw(" "), text]),
        };
        lines.push(line.alignment(alignment));
    }
}

fn thinking_line(theme: &Theme, assistant_name: &str, tick: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            assistant_name.to_string(),
            Style::default().fg(theme.bot).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(theme.primary),
        ),
        Span::styled(
            "Thinking...",
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Scrollable transcript of a conversation.
pub struct ConversationPane<'a> {
    state: &'a ConversationState,
    theme: &'a Theme,
    assistant_name: &'a str,
    tick: usize,
    anchor: Option<&'a ScrollAnchor>,
}

impl<'a> ConversationPane<'a> {
    /// Create a pane for a conversation snapshot.
    pub fn new(state: &'a ConversationState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            assistant_name: "Bot",
            tick: 0,
            anchor: None,
        }
    }

    #[must_use]
    pub fn assistant_name(mut self, name: &'a str) -> Self {
        self.assistant_name = name;
        self
    }

    /// Animation frame for the thinking indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Scroll position. Without one the pane follows the bottom.
    #[must_use]
    pub fn anchor(mut self, anchor: &'a ScrollAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .title(" Conversation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.surface));

        if self.anchor.is_some_and(|a| !a.is_following()) {
            block = block.title_bottom(
                Line::styled(" ↓ newer below ", Style::default().fg(self.theme.muted))
                    .right_aligned(),
            );
        }
        block
    }

    /// Area available to transcript lines.
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    /// Transcript lines wrapped for the given inner width.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        transcript_lines(
            &self.state.view_items(),
            width,
            self.theme,
            self.assistant_name,
            self.tick,
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = self.lines(inner.width);
        let viewport = usize::from(inner.height);

        // vertically center the greeting
        if self.state.messages().is_empty() && !self.state.is_busy() {
            let pad = viewport.saturating_sub(lines.len()) / 2;
            lines.splice(0..0, std::iter::repeat(Line::default()).take(pad));
        }

        let total = lines.len();
        let top = self.anchor.map_or_else(
            || total.saturating_sub(viewport),
            |a| a.top_line(total, viewport),
        );

        Paragraph::new(lines)
            .scroll((top.min(usize::from(u16::MAX)) as u16, 0))
            .render(inner, buf);
    }
}
