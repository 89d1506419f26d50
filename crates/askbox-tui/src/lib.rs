//! askbox-tui: Terminal UI for the askbox chat client
//!
//! This crate provides the interactive front end, including:
//! - A scrolling transcript with a thinking indicator
//! - A multi-line input bar that stays editable while an answer is pending
//! - Headless mode for testing and automation

mod app;
pub mod conversation;
mod event;
pub mod headless;
mod screens;
mod task;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use theme::Theme;

use askbox_engine::{AnswerService, ClientConfig, HttpAnswerService};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::{debug, info};

use task::{join_in_flight, AskTask};

/// RAII guard for terminal state restoration.
#[derive(Default)]
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop against the configured
/// answer service, and restores the terminal on exit.
pub async fn run_tui(config: &ClientConfig, theme: Theme) -> Result<(), Box<dyn std::error::Error>> {
    let service = HttpAnswerService::new(config)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let mut guard = TerminalGuard::default();

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // lets the terminal report Shift+Enter distinctly from Enter
    if matches!(supports_keyboard_enhancement(), Ok(true)) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        guard.keyboard_enhanced = true;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, theme);
    app.keyboard_enhanced = guard.keyboard_enhanced;
    info!(
        endpoint = %app.endpoint,
        keyboard_enhanced = app.keyboard_enhanced,
        "Starting TUI"
    );

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &service).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    service: &S,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: AnswerService + Clone + 'static,
{
    let mut in_flight: Option<AskTask> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            break;
        }

        let event = tokio::select! {
            (pending, outcome) = join_in_flight(&mut in_flight) => {
                app.resolve(pending, outcome);
                continue;
            }
            event = events.next() => event,
        };
        let Some(event) = event else {
            break;
        };
        let pending = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => {
                app.handle_paste(&text);
                None
            }
            Event::Mouse(mouse) => {
                app.handle_mouse(mouse);
                None
            }
            Event::Tick => {
                app.tick();
                None
            }
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                None
            }
        };

        if let Some(pending) = pending {
            in_flight = Some(AskTask::spawn(service, pending));
        }
    }

    if let Some(task) = in_flight.take() {
        task.abort();
    }
    info!(messages = app.conversation.len(), "TUI exited");

    Ok(())
}

/// Returns the version of the askbox-tui crate.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
    }
}
