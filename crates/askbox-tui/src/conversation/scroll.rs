//! Scroll state for the transcript.

/// Scroll position measured in lines up from the bottom.
///
/// An offset of zero follows the newest content. While scrolled back the
/// view stays pinned to the same lines as content grows underneath.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollAnchor {
    offset: usize,
    max_offset: usize,
    total: usize,
}

impl ScrollAnchor {
    /// Create an anchor that follows the bottom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the newest line is in view.
    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    /// Lines scrolled back from the bottom.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Update bounds from the latest render.
    pub fn set_bounds(&mut self, total_lines: usize, viewport: usize) {
        if self.offset > 0 && total_lines > self.total {
            self.offset += total_lines - self.total;
        }
        self.total = total_lines;
        self.max_offset = total_lines.saturating_sub(viewport);
        self.offset = self.offset.min(self.max_offset);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Jump back to the bottom.
    pub fn follow(&mut self) {
        self.offset = 0;
    }

    /// Index of the first visible line.
    pub fn top_line(&self, total_lines: usize, viewport: usize) -> usize {
        total_lines
            .saturating_sub(viewport)
            .saturating_sub(self.offset)
    }
}
