//! Layout helpers for the askbox TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Maximum number of draft lines shown before the input bar scrolls.
pub const MAX_INPUT_LINES: u16 = 5;

/// Areas of the chat screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Split the screen into header, transcript, input bar and footer.
///
/// The input bar grows with the draft up to [`MAX_INPUT_LINES`].
pub fn chat_layout(area: Rect, draft_lines: usize) -> ChatLayout {
    #[allow(clippy::cast_possible_truncation)]
    let input_lines = draft_lines.clamp(1, MAX_INPUT_LINES as usize) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(input_lines + 2),
            Constraint::Length(1),
        ])
        .split(area);

    ChatLayout {
        header: chunks[0],
        transcript: chunks[1],
        input: chunks[2],
        footer: chunks[3],
    }
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
