use async_trait::async_trait;

use docintake_core::DocumentRecord;

use crate::error::BackendError;

/// Key-value persistence for [`DocumentRecord`]s, keyed by `id`.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `record` under its id, replacing any existing item.
    async fn put(&self, record: &DocumentRecord) -> Result<(), BackendError>;

    /// Read a record back by id. Returns `None` if it does not exist.
    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>, BackendError>;
}
