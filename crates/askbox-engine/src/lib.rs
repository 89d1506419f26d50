//! askbox-engine: Headless conversation engine for the askbox chat client
//!
//! This crate provides the core logic behind the chat view, including:
//! - The message model and conversation state machine
//! - Snapshot publishing for front ends (watch channel)
//! - The render projection (welcome / messages / thinking)
//! - The answer service contract and its HTTP client
//! - Client configuration

pub mod config;
pub mod conversation;
pub mod message;
pub mod service;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError, DEFAULT_API_BASE};
pub use conversation::{
    exchange, Conversation, ConversationState, ExchangeReport, PendingAsk, ViewItem,
    NO_ANSWER_TEXT, REQUEST_FAILED_TEXT,
};
pub use message::{Message, Sender};
pub use service::{AnswerService, AskRequest, AskResponse, HttpAnswerService, ServiceError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
