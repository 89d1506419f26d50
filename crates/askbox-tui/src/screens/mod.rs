//! Screen rendering for the askbox TUI.

mod chat;

pub use chat::render_chat;

use crate::app::App;
use crate::ui::centered_fixed;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Render the full frame: chat screen plus the help overlay when open.
pub fn render_app(app: &mut App, area: Rect, buf: &mut Buffer) {
    render_chat(app, area, buf);
    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

/// Render the help overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let newline_keys = if app.keyboard_enhanced {
        "Shift+Enter"
    } else {
        "Ctrl+J"
    };
    let sections: [(&str, &[(&str, &str)]); 3] = [
        (
            "Messages",
            &[
                ("Enter", "Send message"),
                (newline_keys, "Insert newline"),
                ("Left/Right", "Move cursor"),
                ("Home/End", "Start/end of draft"),
            ],
        ),
        (
            "Transcript",
            &[
                ("Up/Down", "Scroll one line"),
                ("PgUp/PgDn", "Scroll one page"),
            ],
        ),
        ("", &[("F1", "Toggle this help"), ("Esc / Ctrl+C", "Quit")]),
    ];

    let mut help_text = String::new();
    for (title, keys) in sections {
        help_text.push('\n');
        if !title.is_empty() {
            help_text.push_str(&format!("  {title}\n"));
        }
        for (key, desc) in keys {
            help_text.push_str(&format!("    {key:<18}{desc}\n"));
        }
    }
    help_text.push_str("\n  [Press any key to close]");

    let width = 50.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.surface).fg(app.theme.text));

    Paragraph::new(help_text).block(block).render(overlay_area, buf);
}
