//! Color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Senders
    pub user: Color,
    pub bot: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    /// Dark violet theme (default).
    pub fn midnight() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(36, 36, 58),    // #24243a
            surface: Color::Rgb(19, 19, 32), // #131320

            // Foregrounds
            text: Color::Rgb(243, 244, 246),  // #f3f4f6
            muted: Color::Rgb(156, 163, 175), // #9ca3af

            // Accents
            primary: Color::Rgb(168, 121, 255), // #a879ff

            // Senders
            user: Color::Rgb(0, 229, 255),   // #00e5ff
            bot: Color::Rgb(194, 159, 255),  // #c29fff

            // Borders
            border: Color::Rgb(58, 58, 94),            // #3a3a5e
            border_focused: Color::Rgb(168, 121, 255), // #a879ff
        }
    }

    /// High contrast theme, also used when colors are disabled.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,

            text: Color::White,
            muted: Color::Gray,

            primary: Color::Magenta,

            user: Color::Cyan,
            bot: Color::LightMagenta,

            border: Color::White,
            border_focused: Color::Magenta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_midnight() {
        let theme = Theme::default();
        assert!(matches!(theme.base, Color::Rgb(36, 36, 58)));
    }

    #[test]
    fn test_senders_are_distinguishable() {
        for theme in [Theme::midnight(), Theme::high_contrast()] {
            assert_ne!(theme.user, theme.bot);
        }
    }
}
