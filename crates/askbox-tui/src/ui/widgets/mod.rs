//! Reusable widget state for the askbox TUI.

pub mod text_input;

pub use text_input::TextInputState;
