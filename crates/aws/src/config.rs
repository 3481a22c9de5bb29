use serde::{Deserialize, Serialize};

/// Session name used for STS assume-role when none is configured.
pub const DEFAULT_SESSION_NAME: &str = "docintake";

/// AWS settings shared by the S3, `DynamoDB` and SQS backends.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    #[serde(default = "default_region")]
    pub region: String,

    /// Optional IAM role ARN to assume via STS.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Optional endpoint URL override (e.g. `LocalStack`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// STS session name, defaults to [`DEFAULT_SESSION_NAME`].
    #[serde(default)]
    pub session_name: Option<String>,

    /// External ID required by the assumed role's trust policy.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.endpoint_url)
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AwsBaseConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.session_name = Some(session_name.into());
        self
    }

    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// The STS session name to use when assuming `role_arn`.
    pub fn session_name(&self) -> &str {
        self.session_name.as_deref().unwrap_or(DEFAULT_SESSION_NAME)
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            role_arn: None,
            endpoint_url: None,
            session_name: None,
            external_id: None,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_owned()
}
