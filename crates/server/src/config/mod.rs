mod backend;
mod logging;
mod server;


pub use backend::*;
pub use logging::*;
pub use server::*;

use serde::Deserialize;

/// Environment variable overriding `[upload] bucket_name`.
pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";
/// Environment variable overriding `[documents] table_name`.
pub const ENV_DYNAMODB_TABLE: &str = "DYNAMODB_TABLE";
/// Environment variable overriding `[documents] queue_url`.
pub const ENV_SQS_QUEUE_URL: &str = "SQS_QUEUE_URL";
/// Environment variable overriding `[aws] region`.
pub const ENV_AWS_REGION: &str = "AWS_REGION";
/// Environment variable overriding `[aws] endpoint_url`.
pub const ENV_AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

/// Top-level configuration for the docintake server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct DocintakeConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Which backend family serves the handlers.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Shared AWS SDK settings.
    #[cfg(feature = "aws")]
    #[serde(default)]
    pub aws: docintake_aws::AwsBaseConfig,
    /// Upload URL issuer settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Document intake settings.
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocintakeConfig {
    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_overrides(|name| std::env::var(name).ok());
    }

    /// Overlay values returned by `lookup`. Unset and empty variables are
    /// ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(bucket) = var(ENV_BUCKET_NAME) {
            self.upload.bucket_name = Some(bucket);
        }
        if let Some(table) = var(ENV_DYNAMODB_TABLE) {
            self.documents.table_name = Some(table);
        }
        if let Some(queue) = var(ENV_SQS_QUEUE_URL) {
            self.documents.queue_url = Some(queue);
        }
        #[cfg(feature = "aws")]
        {
            if let Some(region) = var(ENV_AWS_REGION) {
                self.aws.region = region;
            }
            if let Some(endpoint) = var(ENV_AWS_ENDPOINT_URL) {
                self.aws.endpoint_url = Some(endpoint);
            }
        }
    }
}
