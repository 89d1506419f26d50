//! Test utilities for askbox-tui rendering tests.

use crate::app::App;
use crate::screens::render_app;
use ratatui::{buffer::Buffer, layout::Rect};

pub use crate::headless::buffer_to_string;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test app with the default client configuration.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Render the whole app and return it as a string.
pub fn render_app_to_string(app: &mut App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_app_to_string_fits_size() {
        let mut app = create_test_app();
        let output = render_app_to_string(&mut app, TEST_WIDTH, TEST_HEIGHT);
        assert!(output.contains("Conversation"));
        assert!(output.lines().count() <= TEST_HEIGHT as usize);
        assert!(output
            .lines()
            .all(|line| unicode_width::UnicodeWidthStr::width(line) <= TEST_WIDTH as usize));
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.assistant_name, "JinggStack AI");
        assert_eq!(app.endpoint, "http://localhost:5000/ask");
        assert!(!app.is_busy());
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
