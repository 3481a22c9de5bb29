use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp::iso_millis;

/// Free-form document metadata (a JSON object).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Name of the message attribute tagging published documents.
pub const DOCUMENT_TYPE_ATTRIBUTE: &str = "DocumentType";

/// Value of [`DOCUMENT_TYPE_ATTRIBUTE`] for documents sent to the RAG pipeline.
pub const DOCUMENT_TYPE_RAG: &str = "RAG";

/// Body of a document intake request.
///
/// No field is validated; absent values are simply left out of the record
/// and the queue message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub customer_id: Option<String>,

    /// Object-storage location of the uploaded document.
    pub document_location: Option<String>,

    /// Optional metadata; `null` is treated like an absent field.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// The record persisted once per accepted document.
///
/// Serialises with the store's snake_case attribute names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(rename = "s3_location", default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,

    /// Always present; an empty object when the request carried none.
    #[serde(default)]
    pub metadata: Metadata,

    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Build the record for `request` under the generated `id`.
    pub fn new(id: impl Into<String>, request: &IntakeRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            customer_id: request.customer_id.clone(),
            storage_location: request.document_location.clone(),
            metadata: request.metadata.clone().unwrap_or_default(),
            created_at,
        }
    }
}

/// Notification published after a record has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub document_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_location: Option<String>,

    /// Passed through as received; left out when the request had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Taken when the message is built, independently of `created_at`.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl QueueMessage {
    /// Build the message announcing document `document_id` of `request`.
    pub fn for_request(
        document_id: impl Into<String>,
        request: &IntakeRequest,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            customer_id: request.customer_id.clone(),
            document_location: request.document_location.clone(),
            metadata: request.metadata.clone(),
            timestamp,
        }
    }
}
