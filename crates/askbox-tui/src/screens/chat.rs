//! The chat screen: header, transcript, input bar and footer.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::App;
use crate::conversation::ConversationPane;
use crate::ui::chat_layout;
use crate::widgets::{FooterHints, HeaderBar, InputBar};

/// Render the chat screen.
///
/// Takes `&mut App` to record the transcript geometry for scrolling.
pub fn render_chat(app: &mut App, area: Rect, buf: &mut Buffer) {
    let layout = chat_layout(area, app.input.line_count());
    let state = app.conversation.snapshot();
    let busy = state.is_busy();

    HeaderBar::new(&app.assistant_name, &app.theme)
        .endpoint(&app.endpoint)
        .busy(busy)
        .render(layout.header, buf);

    let pane = ConversationPane::new(&state, &app.theme)
        .assistant_name(&app.assistant_name)
        .tick(app.tick);
    let inner = pane.inner(layout.transcript);
    let total = pane.lines(inner.width).len();
    let viewport = usize::from(inner.height);
    app.scroll.set_bounds(total, viewport);
    app.page_height = viewport;
    pane.anchor(&app.scroll).render(layout.transcript, buf);

    InputBar::new(&app.input, &app.theme)
        .busy(busy)
        .render(layout.input, buf);

    let hints = FooterHints::chat_hints(app.keyboard_enhanced);
    let status = app.status_text();
    FooterHints::new(&hints, &app.theme)
        .status(&status)
        .render(layout.footer, buf);
}
