use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use docintake_backend::{BackendError, PresignRequest, UploadSigner};

use crate::failure::FailureSwitch;

/// Characters left unescaped in object keys (RFC 3986 unreserved plus `/`).
const KEY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Characters left unescaped in query values.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// [`UploadSigner`] producing unsigned, URL-shaped grants.
///
/// The URL has the form
/// `{base_url}/{bucket}/{key}?X-Amz-Expires={secs}&Content-Type={type}`.
#[derive(Debug)]
pub struct MemoryUploadSigner {
    bucket: Option<String>,
    base_url: String,
    calls: AtomicUsize,
    failure: FailureSwitch,
}

impl MemoryUploadSigner {
    pub fn new(bucket: Option<String>) -> Self {
        Self {
            bucket,
            base_url: DEFAULT_BASE_URL.to_owned(),
            calls: AtomicUsize::new(0),
            failure: FailureSwitch::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Make every subsequent signing call fail with a service error carrying `message`.
    pub fn fail_signing(&self, message: impl Into<String>) {
        self.failure.set(message);
    }

    pub fn recover(&self) {
        self.failure.clear();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadSigner for MemoryUploadSigner {
    async fn presign_put(&self, request: &PresignRequest) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failure.check()?;

        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| BackendError::Configuration("no bucket configured".to_owned()))?;
        let key = request
            .key
            .as_deref()
            .ok_or_else(|| BackendError::Service("missing required object key".to_owned()))?;

        let mut url = format!(
            "{}/{bucket}/{}?X-Amz-Expires={}",
            self.base_url,
            utf8_percent_encode(key, KEY_SET),
            request.expires_in.as_secs()
        );
        if let Some(content_type) = &request.content_type {
            url.push_str("&Content-Type=");
            url.extend(utf8_percent_encode(content_type, QUERY_SET));
        }
        Ok(url)
    }
}
