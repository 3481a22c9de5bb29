use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use docintake_backend::{BackendError, MessagePublisher, OutboundMessage};

use crate::failure::FailureSwitch;

/// A message accepted by [`MemoryQueue`].
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub message_id: String,
    pub message: OutboundMessage,
}

/// In-memory [`MessagePublisher`] that records accepted messages.
///
/// Unbounded by default; [`with_capacity`](Self::with_capacity) keeps only
/// the newest messages.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    messages: Mutex<VecDeque<PublishedMessage>>,
    capacity: Option<usize>,
    failure: FailureSwitch,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue retaining at most `capacity` messages, dropping the oldest.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Make every subsequent `publish` fail with a service error carrying `message`.
    pub fn fail_publishes(&self, message: impl Into<String>) {
        self.failure.set(message);
    }

    pub fn recover(&self) {
        self.failure.clear();
    }

    /// Retained messages, oldest first.
    pub fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().iter().cloned().collect()
    }

    pub fn last_message(&self) -> Option<PublishedMessage> {
        self.messages.lock().back().cloned()
    }
}

#[async_trait]
impl MessagePublisher for MemoryQueue {
    async fn publish(&self, message: &OutboundMessage) -> Result<String, BackendError> {
        self.failure.check()?;
        let message_id = uuid::Uuid::new_v4().to_string();
        let mut messages = self.messages.lock();
        if let Some(capacity) = self.capacity {
            while messages.len() >= capacity.max(1) {
                messages.pop_front();
            }
        }
        messages.push_back(PublishedMessage {
            message_id: message_id.clone(),
            message: message.clone(),
        });
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_published_messages() {
        let queue = MemoryQueue::new();
        let msg = OutboundMessage::json(&serde_json::json!({"a": 1}))
            .unwrap()
            .with_attribute("DocumentType", "RAG");
        let id = queue.publish(&msg).await.unwrap();

        let last = queue.last_message().unwrap();
        assert_eq!(last.message_id, id);
        assert_eq!(last.message, msg);
        assert_eq!(queue.messages().len(), 1);
    }

    #[tokio::test]
    async fn failing_publish_records_nothing() {
        let queue = MemoryQueue::new();
        queue.fail_publishes("queue does not exist");
        let msg = OutboundMessage::json(&serde_json::json!({})).unwrap();
        assert!(queue.publish(&msg).await.is_err());
        assert!(queue.messages().is_empty());
    }

    #[tokio::test]
    async fn bounded_queue_keeps_newest_messages() {
        let queue = MemoryQueue::with_capacity(2);
        for n in 0..5 {
            let msg = OutboundMessage::json(&serde_json::json!({ "n": n })).unwrap();
            queue.publish(&msg).await.unwrap();
        }
        let bodies: Vec<String> = queue.messages().into_iter().map(|m| m.message.body).collect();
        assert_eq!(bodies, vec![r#"{"n":3}"#, r#"{"n":4}"#]);
    }
}
