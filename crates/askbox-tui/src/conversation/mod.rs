//! Conversation transcript rendering.
//!
//! - [`ConversationPane`]: the scrollable transcript widget
//! - [`ScrollAnchor`]: follow-the-bottom scroll state
//! - [`placeholder`]: welcome and input placeholder text

pub mod placeholder;
mod scroll;
mod widget;

pub use scroll::ScrollAnchor;
pub use widget::{transcript_lines, ConversationPane};
