//! Event handling for the askbox TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Text was pasted (bracketed paste).
    Paste(String),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submit the draft.
    Submit,
    /// Insert a line break into the draft.
    Newline,
    /// Insert a character into the draft.
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Help,
    Quit,
    None,
}

/// Convert a key event to an action.
///
/// Plain Enter submits. Enter with Shift, Alt or Ctrl held inserts a
/// newline instead, as does Ctrl+J for terminals that cannot report
/// modified Enter.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('j') if ctrl => Action::Newline,
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL) =>
        {
            Action::Newline
        }
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Quit,
        KeyCode::F(1) => Action::Help,
        KeyCode::Char(_) if ctrl || alt => Action::None,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_enter_submits() {
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Submit
        );
    }

    #[test]
    fn test_modified_enter_inserts_newline() {
        for modifiers in [
            KeyModifiers::SHIFT,
            KeyModifiers::ALT,
            KeyModifiers::CONTROL,
            KeyModifiers::SHIFT | KeyModifiers::CONTROL,
        ] {
            assert_eq!(
                key_to_action(key(KeyCode::Enter, modifiers)),
                Action::Newline,
                "{modifiers:?}+Enter should not submit"
            );
        }
    }

    #[test]
    fn test_ctrl_j_inserts_newline() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Action::Newline
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::Insert('j')
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(release), Action::None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(key(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Quit
        );
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Action::Insert('Q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            Action::None
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_to_action(key(KeyCode::Up, KeyModifiers::NONE)),
            Action::ScrollUp
        );
        assert_eq!(
            key_to_action(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Action::PageDown
        );
        assert_eq!(
            key_to_action(key(KeyCode::F(1), KeyModifiers::NONE)),
            Action::Help
        );
    }
}
