//! Conversation state machine.
//!
//! [`Conversation`] owns the message list, the draft and the busy flag.
//! State lives inside a `tokio::sync::watch` channel: every accepted
//! mutation publishes a new [`ConversationState`] snapshot, rejected
//! operations publish nothing. Front ends read snapshots and render
//! [`ConversationState::view_items`]; they never mutate state directly.
//!
//! A submission is a two-step cycle:
//!
//! ```text
//! submit()  ──▶ PendingAsk ──▶ AnswerService::ask ──▶ resolve(pending, outcome)
//!  (user msg, draft cleared, busy)                    (bot msg, not busy)
//! ```

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::message::Message;
use crate::service::{AnswerService, AskResponse, ServiceError};

/// Bot text used when the service succeeds without a usable answer.
pub const NO_ANSWER_TEXT: &str = "Sorry, I couldn't get a response from the server.";

/// Bot text used when the request fails for any reason.
pub const REQUEST_FAILED_TEXT: &str =
    "Oops! Something went wrong. Please try again later. Check your network connection.";

/// Immutable snapshot of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    messages: Vec<Message>,
    draft: String,
    /// Id of the outstanding request, if any.
    in_flight: Option<u64>,
}

impl ConversationState {
    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current uncommitted input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether `submit` would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.draft.trim().is_empty()
    }

    /// Rows to render, in order.
    ///
    /// An idle empty conversation shows only the welcome placeholder. A
    /// busy conversation ends with a transient thinking row.
    pub fn view_items(&self) -> Vec<ViewItem<'_>> {
        if self.messages.is_empty() && !self.is_busy() {
            return vec![ViewItem::Welcome];
        }

        let mut items: Vec<ViewItem<'_>> = self.messages.iter().map(ViewItem::Message).collect();
        if self.is_busy() {
            items.push(ViewItem::Thinking);
        }
        items
    }
}

/// One row of the rendered conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewItem<'a> {
    /// Greeting shown before the first message.
    Welcome,
    /// A message from the list.
    Message(&'a Message),
    /// Indicator that an answer is on its way.
    Thinking,
}

/// Ticket for an accepted submission.
///
/// Returned by [`Conversation::submit`] and consumed by
/// [`Conversation::resolve`]. It cannot be cloned, so each submission is
/// resolved at most once.
#[derive(Debug)]
#[must_use = "a pending ask must be resolved or the conversation stays busy"]
pub struct PendingAsk {
    id: u64,
    query: String,
}

impl PendingAsk {
    /// Text to send to the answer service.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sequence number of this submission.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The conversation store.
#[derive(Debug)]
pub struct Conversation {
    state: watch::Sender<ConversationState>,
    next_id: u64,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConversationState::default());
        Self { state, next_id: 1 }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ConversationState {
        self.state.borrow().clone()
    }

    /// Receive a notification after every accepted mutation.
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state.subscribe()
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Number of messages so far.
    pub fn len(&self) -> usize {
        self.state.borrow().messages.len()
    }

    /// Whether no message has been exchanged yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the draft. Allowed while busy.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|s| {
            if s.draft == text {
                return false;
            }
            s.draft = text;
            true
        });
    }

    /// Accept the draft as a new user message.
    ///
    /// Returns `None` without touching state when the draft is blank or
    /// a request is already outstanding. On acceptance the user message
    /// is appended (verbatim), the draft is cleared and the conversation
    /// becomes busy before the ticket is handed out.
    pub fn submit(&mut self) -> Option<PendingAsk> {
        let id = self.next_id;
        let mut pending = None;

        self.state.send_if_modified(|s| {
            if !s.can_submit() {
                return false;
            }
            s.messages.push(Message::user(s.draft.clone()));
            let query = std::mem::take(&mut s.draft);
            s.in_flight = Some(id);
            pending = Some(PendingAsk { id, query });
            true
        });

        match &pending {
            Some(p) => {
                self.next_id += 1;
                info!(id = p.id, chars = p.query.chars().count(), "Submitted query");
            }
            None => debug!("Submit ignored (blank draft or busy)"),
        }
        pending
    }

    /// Apply the outcome of a pending request.
    ///
    /// Appends exactly one bot message (the answer, or a fixed fallback)
    /// and then clears the busy flag. Returns `false` if the ticket does
    /// not belong to the outstanding request.
    pub fn resolve(
        &mut self,
        pending: PendingAsk,
        outcome: Result<AskResponse, ServiceError>,
    ) -> bool {
        let text = match &outcome {
            Ok(response) => response.answer().map_or_else(
                || {
                    debug!(id = pending.id, "Response carried no usable answer");
                    NO_ANSWER_TEXT.to_string()
                },
                str::to_string,
            ),
            Err(e) => {
                warn!(id = pending.id, error = %e, "Answer request failed");
                REQUEST_FAILED_TEXT.to_string()
            }
        };

        let applied = self.state.send_if_modified(|s| {
            if s.in_flight != Some(pending.id) {
                return false;
            }
            s.messages.push(Message::bot(text));
            s.in_flight = None;
            true
        });

        if !applied {
            warn!(id = pending.id, "Ignoring answer for a request that is not outstanding");
        }
        applied
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one full [`exchange`].
#[derive(Debug, Clone)]
pub struct ExchangeReport {
    /// The submitted text.
    pub query: String,
    /// The bot message appended for it.
    pub reply: Message,
    /// Whether the request failed (reply is the error text).
    pub failed: bool,
}

/// Submit the draft, wait for the service and apply the outcome.
///
/// For callers without an event loop. Returns `None` if the submission
/// was not accepted.
pub async fn exchange<S: AnswerService>(
    conversation: &mut Conversation,
    service: &S,
) -> Option<ExchangeReport> {
    let pending = conversation.submit()?;
    let query = pending.query().to_string();

    let outcome = service.ask(&query).await;
    let failed = outcome.is_err();
    conversation.resolve(pending, outcome);

    let reply = conversation.snapshot().messages().last().cloned()?;
    Some(ExchangeReport {
        query,
        reply,
        failed,
    })
}
