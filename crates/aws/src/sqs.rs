use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::MessageAttributeValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use docintake_backend::{BackendError, MessagePublisher, OutboundMessage};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::{AwsError, classify_sdk_error};

/// Configuration for the SQS publisher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqsConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// URL of the queue notifications are sent to.
    pub queue_url: Option<String>,
}

impl SqsConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            queue_url: None,
        }
    }

    #[must_use]
    pub fn with_queue_url(mut self, queue_url: impl Into<String>) -> Self {
        self.queue_url = Some(queue_url.into());
        self
    }
}

/// SQS-backed [`MessagePublisher`]. Every attribute is sent with data type `String`.
pub struct SqsPublisher {
    config: SqsConfig,
    client: aws_sdk_sqs::Client,
}

impl std::fmt::Debug for SqsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsPublisher")
            .field("config", &self.config)
            .field("client", &"<SqsClient>")
            .finish()
    }
}

impl SqsPublisher {
    pub async fn new(config: SqsConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        Self::from_sdk_config(config, &sdk_config)
    }

    pub fn from_sdk_config(config: SqsConfig, sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            config,
            client: aws_sdk_sqs::Client::new(sdk_config),
        }
    }

    /// Create a publisher with a pre-built client (for testing).
    pub fn with_client(config: SqsConfig, client: aws_sdk_sqs::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl MessagePublisher for SqsPublisher {
    #[instrument(skip(self, message), fields(backend = "aws-sqs"))]
    async fn publish(&self, message: &OutboundMessage) -> Result<String, BackendError> {
        let queue_url = self
            .config
            .queue_url
            .as_deref()
            .ok_or_else(|| AwsError::Configuration("no SQS queue URL configured".to_owned()))?;

        debug!(queue_url = %queue_url, "sending message to SQS queue");

        let mut request = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(&message.body);

        for (name, value) in &message.attributes {
            let attr = MessageAttributeValue::builder()
                .data_type("String")
                .string_value(value)
                .build()
                .map_err(|e| AwsError::Configuration(e.to_string()))?;
            request = request.message_attributes(name, attr);
        }

        let result = request.send().await.map_err(|e| {
            let err_str = DisplayErrorContext(&e).to_string();
            error!(error = %err_str, "SQS send_message failed");
            classify_sdk_error(&err_str)
        })?;

        let message_id = result.message_id().unwrap_or("unknown").to_owned();
        info!(message_id = %message_id, queue_url = %queue_url, "SQS message sent");
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_sets_region() {
        let config = SqsConfig::new("us-west-2");
        assert_eq!(config.aws.region, "us-west-2");
        assert!(config.queue_url.is_none());
    }

    #[test]
    fn config_with_queue_url() {
        let config = SqsConfig::new("us-east-1")
            .with_queue_url("https://sqs.us-east-1.amazonaws.com/123456789012/documents");
        assert_eq!(
            config.queue_url.as_deref(),
            Some("https://sqs.us-east-1.amazonaws.com/123456789012/documents")
        );
    }

    #[test]
    fn config_debug_redacts_role() {
        let mut config = SqsConfig::new("us-east-1");
        config.aws.role_arn = Some("arn:aws:iam::123456789012:role/intake".into());
        let debug = format!("{config:?}");
        assert!(debug.contains("SqsConfig"));
        assert!(debug.contains("[REDACTED]"));
    }
}
