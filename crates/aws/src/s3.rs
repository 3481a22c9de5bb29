use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use docintake_backend::{BackendError, PresignRequest, UploadSigner};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::{AwsError, classify_sdk_error};

/// Configuration for the S3 upload signer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Bucket uploads are granted for.
    pub bucket: Option<String>,

    /// Address buckets by path instead of virtual host (needed by `LocalStack`).
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3Config {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }
}

/// [`UploadSigner`] issuing pre-signed S3 `PutObject` URLs.
///
/// Signing happens locally with the resolved credentials; no request is
/// sent to S3.
pub struct S3UploadSigner {
    config: S3Config,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3UploadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3UploadSigner")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3UploadSigner {
    /// Create a signer with its own SDK configuration.
    pub async fn new(config: S3Config) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        Self::from_sdk_config(config, &sdk_config)
    }

    /// Create a signer from an already loaded SDK configuration.
    pub fn from_sdk_config(config: S3Config, sdk_config: &aws_config::SdkConfig) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(config.force_path_style)
            .build();
        let client = aws_sdk_s3::Client::from_conf(s3_config);
        Self { config, client }
    }

    /// Create a signer with a pre-built client (for testing).
    pub fn with_client(config: S3Config, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    #[instrument(skip(self, request), fields(backend = "aws-s3", key = ?request.key))]
    async fn presign_put(&self, request: &PresignRequest) -> Result<String, BackendError> {
        let bucket = self
            .config
            .bucket
            .as_deref()
            .ok_or_else(|| AwsError::Configuration("no bucket configured".to_owned()))?;

        let presigning = PresigningConfig::expires_in(request.expires_in)
            .map_err(|e| AwsError::Configuration(format!("invalid URL expiry: {e}")))?;

        debug!(bucket = %bucket, expires_in = request.expires_in.as_secs(), "pre-signing S3 put_object");

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .set_key(request.key.clone())
            .set_content_type(request.content_type.clone())
            .presigned(presigning)
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "S3 put_object pre-signing failed");
                classify_sdk_error(&err_str)
            })?;

        info!(bucket = %bucket, "S3 upload URL issued");
        Ok(presigned.uri().to_string())
    }
}
