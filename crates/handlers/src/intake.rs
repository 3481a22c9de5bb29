use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, info, instrument, warn};

use docintake_backend::{DocumentStore, MessagePublisher, OutboundMessage};
use docintake_core::{
    DOCUMENT_TYPE_ATTRIBUTE, DOCUMENT_TYPE_RAG, DocumentRecord, IdGenerator, IntakeRequest,
    QueueMessage, TimestampIdGenerator,
};

use crate::error::HandlerError;
use crate::response::HandlerResponse;

pub const INTAKE_SUCCESS_MESSAGE: &str = "Document processed successfully";
pub const INTAKE_ERROR_MESSAGE: &str = "Error processing document";

/// Records an uploaded document and notifies the processing queue.
///
/// The record write and the queue publish run strictly in that order. If the
/// publish fails after the write succeeded, the record stays persisted with
/// no message ever sent and the caller still gets a 500. Nothing compensates
/// for that gap: delivery is at most once.
pub struct DocumentIntake {
    store: Arc<dyn DocumentStore>,
    publisher: Arc<dyn MessagePublisher>,
    ids: Arc<dyn IdGenerator>,
}

impl DocumentIntake {
    /// Create an intake handler using [`TimestampIdGenerator`] for ids.
    pub fn new(store: Arc<dyn DocumentStore>, publisher: Arc<dyn MessagePublisher>) -> Self {
        Self {
            store,
            publisher,
            ids: Arc::new(TimestampIdGenerator),
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Handle one request with the raw (JSON) body.
    #[instrument(skip_all, fields(handler = "document_intake"))]
    pub async fn handle(&self, body: &[u8]) -> HandlerResponse {
        match self.process(body).await {
            Ok(document_id) => HandlerResponse::ok(&json!({
                "message": INTAKE_SUCCESS_MESSAGE,
                "documentId": document_id,
            })),
            Err(e) => self.failure(&e),
        }
    }

    /// The response for a request that failed with `error`, including
    /// failures raised before the body reached [`handle`](Self::handle).
    #[allow(clippy::unused_self)]
    pub fn failure(&self, error: &HandlerError) -> HandlerResponse {
        error!(error = %error, "error processing document");
        HandlerResponse::internal_error(&json!({
            "message": INTAKE_ERROR_MESSAGE,
            "error": error.to_string(),
        }))
    }

    async fn process(&self, body: &[u8]) -> Result<String, HandlerError> {
        let request: IntakeRequest = serde_json::from_slice(body)?;
        let document_id = self.ids.generate();

        let record = DocumentRecord::new(document_id.clone(), &request, Utc::now());
        self.store.put(&record).await?;

        let message = QueueMessage::for_request(document_id.clone(), &request, Utc::now());
        let outbound = OutboundMessage::json(&message)?
            .with_attribute(DOCUMENT_TYPE_ATTRIBUTE, DOCUMENT_TYPE_RAG);
        let message_id = self.publisher.publish(&outbound).await.inspect_err(|e| {
            warn!(
                document_id = %document_id,
                error = %e,
                "record persisted but notification was not sent"
            );
        })?;

        info!(document_id = %document_id, message_id = %message_id, "document accepted");
        Ok(document_id)
    }
}
