use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::BackendError;

/// A message ready to be sent to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Serialised message body.
    pub body: String,

    /// String-typed message attributes.
    pub attributes: BTreeMap<String, String>,
}

impl OutboundMessage {
    /// Serialise `payload` as the JSON message body.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, BackendError> {
        Ok(Self {
            body: serde_json::to_string(payload)?,
            attributes: BTreeMap::new(),
        })
    }

    /// Attach a string attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Publishes messages to the configured queue.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Send `message`, returning the queue-assigned message id.
    async fn publish(&self, message: &OutboundMessage) -> Result<String, BackendError>;
}
