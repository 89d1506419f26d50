//! Multi-line text input state.
//!
//! The cursor is a character index, so editing stays correct for
//! non-ASCII input.

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    ///
    /// Carriage returns are dropped so pasted Windows text keeps one
    /// newline per line break.
    pub fn insert_str(&mut self, s: &str) {
        let cleaned: String = s.chars().filter(|c| *c != '\r').collect();
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Number of display lines in the content.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Line and column (both character based) of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.content.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor(), 0);
        state.move_left();
        assert_eq!(state.cursor(), 0);

        state.move_end();
        assert_eq!(state.cursor(), 6);
        state.move_right();
        assert_eq!(state.cursor(), 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("héllo 你好");
        assert_eq!(state.cursor(), 8);

        state.move_left();
        state.backspace();
        assert_eq!(state.content(), "héllo 好");

        state.move_home();
        state.move_right();
        state.delete();
        assert_eq!(state.content(), "hllo 好");

        state.insert('é');
        assert_eq!(state.content(), "héllo 好");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut state = TextInputState::new();
        state.insert_str("ab");
        state.delete();
        assert_eq!(state.content(), "ab");
    }

    #[test]
    fn test_paste_drops_carriage_returns() {
        let mut state = TextInputState::new();
        state.insert_str("one\r\ntwo");
        assert_eq!(state.content(), "one\ntwo");
        assert_eq!(state.cursor(), 7);
        assert_eq!(state.line_count(), 2);
    }

    #[test]
    fn test_cursor_line_col() {
        let mut state = TextInputState::new();
        state.insert_str("ab\ncde");
        assert_eq!(state.cursor_line_col(), (1, 3));

        state.move_home();
        assert_eq!(state.cursor_line_col(), (0, 0));

        state.move_right();
        state.move_right();
        state.move_right();
        assert_eq!(state.cursor_line_col(), (1, 0));
    }
}
