//! Application state and update logic for the askbox TUI.

use askbox_engine::{AskResponse, ClientConfig, Conversation, PendingAsk, ServiceError};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::conversation::ScrollAnchor;
use crate::event::{key_to_action, Action};
use crate::theme::Theme;
use crate::ui::widgets::TextInputState;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// Main application state.
pub struct App {
    /// Conversation store. All message and busy state lives here.
    pub conversation: Conversation,
    /// Draft editor. Mirrored into the conversation on every edit.
    pub input: TextInputState,
    /// Transcript scroll position.
    pub scroll: ScrollAnchor,
    pub theme: Theme,
    /// Name shown for bot messages.
    pub assistant_name: String,
    /// Ask endpoint, shown in the header.
    pub endpoint: String,
    pub show_help: bool,
    pub should_quit: bool,
    /// Whether the terminal reports modified Enter.
    pub keyboard_enhanced: bool,
    /// Animation frame counter.
    pub tick: usize,
    /// Transcript viewport height from the last render.
    pub page_height: usize,
}

impl App {
    /// Create a new application for the given client configuration.
    pub fn new(config: &ClientConfig, theme: Theme) -> Self {
        Self {
            conversation: Conversation::new(),
            input: TextInputState::new(),
            scroll: ScrollAnchor::new(),
            theme,
            assistant_name: config.assistant_name.clone(),
            endpoint: config.ask_url(),
            show_help: false,
            should_quit: false,
            keyboard_enhanced: false,
            tick: 0,
            page_height: 10,
        }
    }

    /// Create an app with default configuration for tests.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new(&ClientConfig::default(), Theme::default())
    }

    /// Whether an answer is outstanding.
    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy()
    }

    /// Handle a key press.
    ///
    /// Returns a ticket when the key submitted the draft; the caller is
    /// responsible for sending it and calling [`App::resolve`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingAsk> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = key_to_action(key);

        // any key closes help; Ctrl+C still quits
        if self.show_help {
            self.show_help = false;
            if action == Action::Quit && key.code != KeyCode::Esc {
                self.should_quit = true;
            }
            return None;
        }

        self.handle_action(action)
    }

    /// Apply an action.
    pub fn handle_action(&mut self, action: Action) -> Option<PendingAsk> {
        match action {
            Action::Submit => return self.submit(),
            Action::Newline => self.edit(|input| input.insert('\n')),
            Action::Insert(c) => self.edit(|input| input.insert(c)),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::ScrollUp => self.scroll.scroll_up(1),
            Action::ScrollDown => self.scroll.scroll_down(1),
            Action::PageUp => self.scroll.scroll_up(self.page_height.max(1)),
            Action::PageDown => self.scroll.scroll_down(self.page_height.max(1)),
            Action::Help => self.show_help = true,
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
        None
    }

    /// Insert pasted text at the cursor.
    pub fn handle_paste(&mut self, text: &str) {
        if self.show_help {
            self.show_help = false;
        }
        self.edit(|input| input.insert_str(text));
    }

    /// Scroll the transcript with the mouse wheel.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.scroll.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    /// Apply the outcome of a request started by [`App::handle_key`].
    pub fn resolve(
        &mut self,
        pending: PendingAsk,
        outcome: Result<AskResponse, ServiceError>,
    ) -> bool {
        self.conversation.resolve(pending, outcome)
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Footer status text.
    pub fn status_text(&self) -> String {
        match self.conversation.len() {
            0 => "No messages yet".to_string(),
            1 => "1 message".to_string(),
            n => format!("{n} messages"),
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        f(&mut self.input);
        self.conversation.update_draft(self.input.content());
    }

    fn submit(&mut self) -> Option<PendingAsk> {
        let pending = self.conversation.submit()?;
        debug!(id = pending.id(), "Draft submitted from input bar");
        self.input.clear();
        self.scroll.follow();
        Some(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbox_engine::{Sender, NO_ANSWER_TEXT, REQUEST_FAILED_TEXT};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert!(app.handle_key(press(KeyCode::Char(c))).is_none());
        }
    }

    #[test]
    fn test_typing_updates_draft() {
        let mut app = App::new_for_test();
        type_text(&mut app, "hello");
        assert_eq!(app.input.content(), "hello");
        assert_eq!(app.conversation.snapshot().draft(), "hello");

        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.conversation.snapshot().draft(), "hell");
    }

    #[test]
    fn test_enter_submits_and_clears_input() {
        let mut app = App::new_for_test();
        type_text(&mut app, "hello");

        let pending = app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(pending.query(), "hello");
        assert!(app.input.is_empty());
        assert!(app.is_busy());

        let state = app.conversation.snapshot();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].sender(), Sender::User);

        assert!(app.resolve(pending, Ok(AskResponse::with_answer("hi there"))));
        assert!(!app.is_busy());
        assert_eq!(app.conversation.snapshot().messages()[1].text(), "hi there");
    }

    #[test]
    fn test_blank_draft_is_not_submitted() {
        let mut app = App::new_for_test();
        type_text(&mut app, "   ");
        assert!(app.handle_key(press(KeyCode::Enter)).is_none());
        assert_eq!(app.input.content(), "   ");
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn test_enter_while_busy_keeps_new_draft() {
        let mut app = App::new_for_test();
        type_text(&mut app, "first");
        let pending = app.handle_key(press(KeyCode::Enter)).unwrap();

        type_text(&mut app, "second");
        assert!(app.handle_key(press(KeyCode::Enter)).is_none());
        assert_eq!(app.input.content(), "second");
        assert_eq!(app.conversation.len(), 1);

        app.resolve(pending, Ok(AskResponse::default()));
        let state = app.conversation.snapshot();
        assert_eq!(state.messages()[1].text(), NO_ANSWER_TEXT);
        assert_eq!(state.draft(), "second");

        let next = app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(next.query(), "second");
    }

    #[test]
    fn test_modified_enter_inserts_newline() {
        let mut app = App::new_for_test();
        type_text(&mut app, "a");
        let shift_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert!(app.handle_key(shift_enter).is_none());
        type_text(&mut app, "b");

        assert_eq!(app.input.content(), "a\nb");
        assert!(app.conversation.is_empty());

        let pending = app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(pending.query(), "a\nb");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = App::new_for_test();
        let mut release = press(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_failed_request_appends_error_text() {
        let mut app = App::new_for_test();
        type_text(&mut app, "ping");
        let pending = app.handle_key(press(KeyCode::Enter)).unwrap();
        app.resolve(
            pending,
            Err(ServiceError::Status {
                status: 503,
                body: String::new(),
            }),
        );

        let state = app.conversation.snapshot();
        assert_eq!(state.messages()[1].text(), REQUEST_FAILED_TEXT);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let mut app = App::new_for_test();
        type_text(&mut app, "ab");
        app.handle_key(press(KeyCode::Left));
        app.handle_paste("XY\r\nZ");

        assert_eq!(app.input.content(), "aXY\nZb");
        assert_eq!(app.conversation.snapshot().draft(), "aXY\nZb");
    }

    #[test]
    fn test_help_toggle_and_close() {
        let mut app = App::new_for_test();
        app.handle_key(press(KeyCode::F(1)));
        assert!(app.show_help);

        // the closing key is swallowed
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.input.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = App::new_for_test();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_resumes_following() {
        let mut app = App::new_for_test();
        app.scroll.set_bounds(100, 10);
        app.handle_key(press(KeyCode::PageUp));
        assert!(!app.scroll.is_following());

        type_text(&mut app, "question");
        let _pending = app.handle_key(press(KeyCode::Enter)).unwrap();
        assert!(app.scroll.is_following());
    }

    #[test]
    fn test_status_text() {
        let mut app = App::new_for_test();
        assert_eq!(app.status_text(), "No messages yet");
        type_text(&mut app, "x");
        let pending = app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(app.status_text(), "1 message");
        app.resolve(pending, Ok(AskResponse::with_answer("y")));
        assert_eq!(app.status_text(), "2 messages");
    }
}
