use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifetime of every pre-signed upload URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(300);

/// Body of an upload URL request.
///
/// Both fields are optional at the type level: a missing value is passed on
/// to the signer, which rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Object key the caller wants to upload to.
    pub file_name: Option<String>,

    /// MIME type the upload must be sent with.
    pub file_type: Option<String>,
}

/// Successful response body of the upload URL issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}
