use docintake_backend::BackendError;
use thiserror::Error;

/// Errors raised by the AWS backends.
#[derive(Debug, Error)]
pub enum AwsError {
    /// The AWS SDK returned an error from the service.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    /// The request was throttled by the AWS service.
    #[error("AWS request throttled: {0}")]
    Throttled(String),

    /// A network or connection error occurred communicating with AWS.
    #[error("AWS connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("AWS request timed out: {0}")]
    Timeout(String),

    /// A record could not be converted to or from `DynamoDB` attributes.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Configuration is invalid or incomplete.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<AwsError> for BackendError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::ServiceError(msg) => BackendError::Service(msg),
            AwsError::Throttled(msg) => BackendError::Throttled(msg),
            AwsError::Connection(msg) => BackendError::Connection(msg),
            AwsError::Timeout(msg) => BackendError::Timeout(msg),
            AwsError::InvalidItem(msg) => BackendError::Serialization(msg),
            AwsError::Configuration(msg) => BackendError::Configuration(msg),
        }
    }
}

/// Classify a rendered AWS SDK error into the appropriate [`AwsError`].
///
/// Inspects the message for throttling, timeout and connection patterns;
/// every variant keeps the full message.
pub fn classify_sdk_error(error_str: &str) -> AwsError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many") {
        AwsError::Throttled(error_str.to_owned())
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsError::Timeout(error_str.to_owned())
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        AwsError::Connection(error_str.to_owned())
    } else {
        AwsError::ServiceError(error_str.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_maps_to_throttled_with_sdk_text() {
        let err: BackendError =
            AwsError::Throttled("ThrottlingException: Rate exceeded".into()).into();
        assert!(matches!(err, BackendError::Throttled(_)));
        assert_eq!(
            err.to_string(),
            "request throttled: ThrottlingException: Rate exceeded"
        );
    }

    #[test]
    fn timeout_keeps_sdk_text() {
        let err: BackendError = classify_sdk_error("Request timed out after 30s").into();
        assert!(matches!(err, BackendError::Timeout(_)));
        assert!(err.to_string().contains("Request timed out after 30s"));
    }

    #[test]
    fn service_error_keeps_message() {
        let err: BackendError =
            AwsError::ServiceError("ResourceNotFoundException: no table".into()).into();
        assert_eq!(
            err.to_string(),
            "service error: ResourceNotFoundException: no table"
        );
    }

    #[test]
    fn invalid_item_maps_to_serialization() {
        let err: BackendError = AwsError::InvalidItem("unsupported binary".into()).into();
        assert!(matches!(err, BackendError::Serialization(_)));
    }

    #[test]
    fn configuration_maps_to_configuration() {
        let err: BackendError = AwsError::Configuration("no queue url".into()).into();
        assert!(matches!(err, BackendError::Configuration(_)));
    }

    #[test]
    fn classify_throttled() {
        assert!(matches!(
            classify_sdk_error("ProvisionedThroughputExceededException: Rate exceeded"),
            AwsError::Throttled(msg) if msg.contains("Rate exceeded")
        ));
    }

    #[test]
    fn classify_timeout() {
        assert!(matches!(
            classify_sdk_error("Request timed out after 30s"),
            AwsError::Timeout(_)
        ));
    }

    #[test]
    fn classify_connection() {
        assert!(matches!(
            classify_sdk_error("dispatch failure: Connection refused: localhost:4566"),
            AwsError::Connection(_)
        ));
    }

    #[test]
    fn classify_generic_service_error() {
        assert!(matches!(
            classify_sdk_error("AccessDenied: not authorized to perform s3:PutObject"),
            AwsError::ServiceError(_)
        ));
    }
}
