//! Background answer requests.

use askbox_engine::{AnswerService, AskResponse, PendingAsk, ServiceError};
use tokio::task::JoinHandle;
use tracing::debug;

/// An answer request running on the tokio runtime.
pub(crate) struct AskTask {
    pending: PendingAsk,
    handle: JoinHandle<Result<AskResponse, ServiceError>>,
}

impl AskTask {
    /// Start sending the ticket's query.
    pub(crate) fn spawn<S>(service: &S, pending: PendingAsk) -> Self
    where
        S: AnswerService + Clone + 'static,
    {
        let service = service.clone();
        let query = pending.query().to_string();
        let handle = tokio::spawn(async move { service.ask(&query).await });
        Self { pending, handle }
    }

    /// Cancel the request. Used on quit.
    pub(crate) fn abort(self) {
        debug!(id = self.pending.id(), "Aborting outstanding request");
        self.handle.abort();
    }
}

/// Wait for the outstanding request to complete and take it.
///
/// Never completes while nothing is in flight. Cancel safe: dropping the
/// future before completion leaves the request in place.
pub(crate) async fn join_in_flight(
    in_flight: &mut Option<AskTask>,
) -> (PendingAsk, Result<AskResponse, ServiceError>) {
    let Some(task) = in_flight.as_mut() else {
        return std::future::pending().await;
    };
    let outcome = match (&mut task.handle).await {
        Ok(outcome) => outcome,
        Err(e) => Err(ServiceError::Task(e.to_string())),
    };
    match in_flight.take() {
        Some(task) => (task.pending, outcome),
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbox_engine::Conversation;
    use std::time::Duration;

    #[derive(Clone)]
    struct Fixed(&'static str);

    impl AnswerService for Fixed {
        async fn ask(&self, _query: &str) -> Result<AskResponse, ServiceError> {
            Ok(AskResponse::with_answer(self.0))
        }
    }

    #[derive(Clone)]
    struct Never;

    impl AnswerService for Never {
        async fn ask(&self, _query: &str) -> Result<AskResponse, ServiceError> {
            std::future::pending().await
        }
    }

    fn ticket(query: &str) -> (Conversation, PendingAsk) {
        let mut conversation = Conversation::new();
        conversation.update_draft(query);
        let pending = conversation.submit().unwrap();
        (conversation, pending)
    }

    #[tokio::test]
    async fn test_join_returns_outcome_with_its_ticket() {
        let (mut conversation, pending) = ticket("hello");
        let mut in_flight = Some(AskTask::spawn(&Fixed("hi"), pending));

        let (pending, outcome) =
            tokio::time::timeout(Duration::from_secs(5), join_in_flight(&mut in_flight))
                .await
                .unwrap();
        assert!(in_flight.is_none());
        assert_eq!(pending.query(), "hello");
        assert!(conversation.resolve(pending, outcome));
        assert_eq!(conversation.snapshot().messages()[1].text(), "hi");
    }

    #[tokio::test]
    async fn test_join_pends_without_request() {
        let mut in_flight = None;
        let waited =
            tokio::time::timeout(Duration::from_millis(50), join_in_flight(&mut in_flight)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_dropped_join_keeps_request() {
        let (_conversation, pending) = ticket("hello");
        let mut in_flight = Some(AskTask::spawn(&Never, pending));

        let waited =
            tokio::time::timeout(Duration::from_millis(50), join_in_flight(&mut in_flight)).await;
        assert!(waited.is_err());
        assert!(in_flight.is_some());

        if let Some(task) = in_flight.take() {
            task.abort();
        }
    }
}
