//! Chat messages exchanged between the user and the answer service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Text typed by the user.
    User,
    /// Answer (or fallback) from the bot.
    Bot,
}

impl Sender {
    /// Label shown next to the message in the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => "Bot",
        }
    }
}

/// A single message in the conversation.
///
/// Fields are private so a message cannot change after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Whether this message was written by the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
