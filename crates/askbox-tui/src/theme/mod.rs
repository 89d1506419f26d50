//! Theme components for the TUI.
//!
//! This module provides [`Theme`], the color palette (midnight and high
//! contrast variants).

mod colors;

pub use colors::Theme;
