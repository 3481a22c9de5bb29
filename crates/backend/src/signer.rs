use std::time::Duration;

use async_trait::async_trait;

use crate::error::BackendError;

/// Parameters of a pre-signed object upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignRequest {
    /// Object key. `None` is forwarded so the signer can reject it.
    pub key: Option<String>,

    /// Content type the upload is bound to.
    pub content_type: Option<String>,

    /// How long the URL stays valid.
    pub expires_in: Duration,
}

/// Issues time-limited write URLs for an object-storage bucket.
///
/// The bucket is part of the signer's own configuration.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Return a URL authorising a single `PUT` of `request.key`.
    async fn presign_put(&self, request: &PresignRequest) -> Result<String, BackendError>;
}
