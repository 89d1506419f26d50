//! Headless mode for the askbox TUI.
//!
//! Runs the full event loop against a `TestBackend` instead of a real
//! terminal. Input is sent over a channel and the rendered screen is
//! published after every frame, which makes end-to-end tests and
//! scripted sessions possible.

use askbox_engine::{AnswerService, ClientConfig};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::app::App;
use crate::event::Action;
use crate::screens::render_app;
use crate::task::{join_in_flight, AskTask};
use crate::theme::Theme;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Input delivered to a headless TUI.
#[derive(Debug, Clone)]
pub enum HeadlessInput {
    /// A raw key event, mapped like a real key press.
    Key(KeyEvent),
    /// An already mapped action.
    Action(Action),
    /// Bracketed paste.
    Paste(String),
}

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Number of messages in the conversation.
    pub message_count: usize,
    /// Whether an answer is outstanding.
    pub busy: bool,
    /// Current draft text.
    pub draft: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    input_tx: mpsc::UnboundedSender<HeadlessInput>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.input_tx.send(HeadlessInput::Action(action)).is_ok()
    }

    /// Send a key event to the TUI.
    pub fn send_key(&self, key: KeyEvent) -> bool {
        self.input_tx.send(HeadlessInput::Key(key)).is_ok()
    }

    /// Paste text into the input bar.
    pub fn paste(&self, text: impl Into<String>) -> bool {
        self.input_tx.send(HeadlessInput::Paste(text.into())).is_ok()
    }

    /// Type text one key at a time. Newlines become Shift+Enter.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| {
            let key = if c == '\n' {
                KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)
            } else {
                KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
            };
            self.send_key(key)
        })
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // timed out, or the loop ended without meeting the condition
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 20,
        }
    }
}

/// Run the TUI in headless mode against the given answer service.
///
/// Returns a handle to control the TUI and a join handle for the
/// background task.
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(service, &config, HeadlessConfig::default());
/// handle.type_text("hello");
/// handle.send_action(Action::Submit);
/// handle.wait_for_text("hi there", Duration::from_secs(2)).await;
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless<S>(
    service: S,
    client: &ClientConfig,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>)
where
    S: AnswerService + Clone + 'static,
{
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let app = App::new(client, Theme::default());

    let task = tokio::spawn(async move {
        run_headless_loop(app, service, config, input_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { input_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop<S>(
    mut app: App,
    service: S,
    config: HeadlessConfig,
    mut input_rx: mpsc::UnboundedReceiver<HeadlessInput>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    S: AnswerService + Clone + 'static,
{
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let tick_duration = Duration::from_millis(config.tick_rate_ms);
    let mut in_flight: Option<AskTask> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_app(&mut app, area, frame.buffer_mut());
        })?;

        let snapshot = app.conversation.snapshot();
        let _ = state_tx.send(HeadlessState {
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            message_count: snapshot.messages().len(),
            busy: snapshot.is_busy(),
            draft: snapshot.draft().to_string(),
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        let pending = tokio::select! {
            (pending, outcome) = join_in_flight(&mut in_flight) => {
                app.resolve(pending, outcome);
                None
            }
            input = input_rx.recv() => match input {
                Some(HeadlessInput::Key(key)) => app.handle_key(key),
                Some(HeadlessInput::Action(action)) => app.handle_action(action),
                Some(HeadlessInput::Paste(text)) => {
                    app.handle_paste(&text);
                    None
                }
                // every handle is gone; nobody can quit us any more
                None => break,
            },
            () = tokio::time::sleep(tick_duration) => {
                app.tick();
                None
            }
        };

        if let Some(pending) = pending {
            in_flight = Some(AskTask::spawn(&service, pending));
        }
    }

    if let Some(task) = in_flight.take() {
        task.abort();
    }

    Ok(())
}

/// Convert a rendered buffer to text, one line per row.
///
/// Trailing whitespace is trimmed from each row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
