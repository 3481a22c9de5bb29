//! Core types shared by the docintake handlers.
//!
//! - [`upload`] — request/response bodies of the upload URL issuer
//! - [`document`] — intake request, persisted [`DocumentRecord`] and the
//!   [`QueueMessage`] published for downstream processing
//! - [`id`] — pluggable document identifier strategies
//! - [`timestamp`] — ISO-8601 millisecond timestamp formatting

pub mod document;
pub mod id;
pub mod timestamp;
pub mod upload;

pub use document::{
    DOCUMENT_TYPE_ATTRIBUTE, DOCUMENT_TYPE_RAG, DocumentRecord, IntakeRequest, Metadata,
    QueueMessage,
};
pub use id::{
    DOCUMENT_ID_PREFIX, IdGenerator, IdStrategy, TimestampIdGenerator, UuidIdGenerator,
};
pub use upload::{UPLOAD_URL_TTL, UploadRequest, UploadResponse};
