//! UI widgets for the chat screen.
//!
//! - [`HeaderBar`] - Top bar with assistant name and connection status
//! - [`InputBar`] - Draft editor at the bottom
//! - [`FooterHints`] - Keybinding hints

mod footer_hints;
mod header_bar;
mod input_bar;

pub use footer_hints::{FooterHints, KeyHint};
pub use header_bar::HeaderBar;
pub use input_bar::InputBar;
