//! UI module for the askbox TUI.

pub mod layout;
pub mod widgets;

pub use layout::*;
pub use widgets::*;
