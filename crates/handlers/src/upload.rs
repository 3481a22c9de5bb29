use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use docintake_backend::{PresignRequest, UploadSigner};
use docintake_core::{UPLOAD_URL_TTL, UploadRequest, UploadResponse};

use crate::error::HandlerError;
use crate::response::HandlerResponse;

/// Body returned for every failure; the cause is never exposed.
pub const UPLOAD_ERROR_MESSAGE: &str = "Error generating presigned URL";

/// Issues pre-signed upload URLs (`{fileName, fileType}` → `{uploadURL}`).
///
/// Missing fields are not checked here: they reach the signer, which fails,
/// and every failure maps to the same 500 body.
pub struct UploadUrlIssuer {
    signer: Arc<dyn UploadSigner>,
}

impl UploadUrlIssuer {
    pub fn new(signer: Arc<dyn UploadSigner>) -> Self {
        Self { signer }
    }

    /// Handle one request with the raw (JSON) body.
    #[instrument(skip_all, fields(handler = "upload_url"))]
    pub async fn handle(&self, body: &[u8]) -> HandlerResponse {
        match self.issue(body).await {
            Ok(response) => HandlerResponse::ok(&response),
            Err(e) => self.failure(&e),
        }
    }

    /// The response for a request that failed with `error`, including
    /// failures raised before the body reached [`handle`](Self::handle).
    #[allow(clippy::unused_self)]
    pub fn failure(&self, error: &HandlerError) -> HandlerResponse {
        warn!(error = %error, "upload URL request failed");
        HandlerResponse::internal_error(&json!({ "message": UPLOAD_ERROR_MESSAGE }))
    }

    async fn issue(&self, body: &[u8]) -> Result<serde_json::Value, HandlerError> {
        let request: UploadRequest = serde_json::from_slice(body)?;
        let presign = PresignRequest {
            key: request.file_name,
            content_type: request.file_type,
            expires_in: UPLOAD_URL_TTL,
        };
        let upload_url = self.signer.presign_put(&presign).await?;
        info!(key = ?presign.key, "upload URL issued");
        Ok(serde_json::to_value(UploadResponse { upload_url })?)
    }
}
