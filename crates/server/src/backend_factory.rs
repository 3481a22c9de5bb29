use std::sync::Arc;

use docintake_backend::{DocumentStore, MessagePublisher, UploadSigner};
use docintake_memory::{MemoryDocumentStore, MemoryQueue, MemoryUploadSigner};
use tracing::{info, warn};

use crate::config::{BackendKind, DocintakeConfig};
use crate::error::ServerError;

/// The three collaborators shared by every request.
#[derive(Clone)]
pub struct Backends {
    pub signer: Arc<dyn UploadSigner>,
    pub store: Arc<dyn DocumentStore>,
    pub publisher: Arc<dyn MessagePublisher>,
}

impl Backends {
    /// In-memory backends signing for `bucket`, each retaining at most
    /// `capacity` records or messages.
    pub fn memory(bucket: Option<String>, capacity: usize) -> Self {
        Self {
            signer: Arc::new(MemoryUploadSigner::new(bucket)),
            store: Arc::new(MemoryDocumentStore::with_capacity(capacity)),
            publisher: Arc::new(MemoryQueue::with_capacity(capacity)),
        }
    }
}

/// Build the backends selected by `[backend] kind`.
///
/// Missing bucket, table or queue settings are not checked here; each
/// backend reports them when it is first called.
#[allow(clippy::unused_async)]
pub async fn create_backends(config: &DocintakeConfig) -> Result<Backends, ServerError> {
    let backends = match config.backend.kind {
        BackendKind::Memory => {
            warn!(
                capacity = config.backend.memory_capacity,
                "MEMORY BACKEND IN USE: upload URLs are not signed and documents \
                 never leave this process; set [backend] kind = \"aws\" for real use"
            );
            Backends::memory(
                config.upload.bucket_name.clone(),
                config.backend.memory_capacity,
            )
        }
        #[cfg(feature = "aws")]
        BackendKind::Aws => aws::create(config).await,
        #[cfg(not(feature = "aws"))]
        BackendKind::Aws => {
            return Err(ServerError::Config(
                "aws backend requires the `aws` feature".into(),
            ));
        }
    };
    info!(backend = %config.backend.kind, "backends initialized");
    Ok(backends)
}

/// Create the `DynamoDB` documents table named by `[documents] table_name`.
#[cfg(feature = "aws")]
pub async fn create_documents_table(config: &DocintakeConfig) -> Result<(), ServerError> {
    aws::create_table(config).await
}

/// Create the `DynamoDB` documents table named by `[documents] table_name`.
#[cfg(not(feature = "aws"))]
#[allow(clippy::unused_async)]
pub async fn create_documents_table(_config: &DocintakeConfig) -> Result<(), ServerError> {
    Err(ServerError::Config(
        "create-table requires the `aws` feature".into(),
    ))
}

#[cfg(feature = "aws")]
mod aws {
    use std::sync::Arc;

    use docintake_aws::{
        AwsBaseConfig, DynamoConfig, DynamoDocumentStore, S3Config, S3UploadSigner, SqsConfig,
        SqsPublisher, build_sdk_config,
    };
    use tracing::info;

    use super::Backends;
    use crate::config::DocintakeConfig;
    use crate::error::ServerError;

    fn dynamo_config(config: &DocintakeConfig, base: AwsBaseConfig) -> DynamoConfig {
        DynamoConfig {
            aws: base,
            table_name: config.documents.table_name.clone(),
        }
    }

    pub(super) async fn create(config: &DocintakeConfig) -> Backends {
        let base = config.aws.clone();
        let sdk_config = build_sdk_config(&base).await;

        let signer = S3UploadSigner::from_sdk_config(
            S3Config {
                aws: base.clone(),
                bucket: config.upload.bucket_name.clone(),
                force_path_style: config.upload.force_path_style,
            },
            &sdk_config,
        );
        let store = DynamoDocumentStore::from_sdk_config(
            dynamo_config(config, base.clone()),
            &sdk_config,
        );
        let publisher = SqsPublisher::from_sdk_config(
            SqsConfig {
                aws: base,
                queue_url: config.documents.queue_url.clone(),
            },
            &sdk_config,
        );

        info!(
            region = %config.aws.region,
            endpoint = ?config.aws.endpoint_url,
            "AWS clients initialized"
        );

        Backends {
            signer: Arc::new(signer),
            store: Arc::new(store),
            publisher: Arc::new(publisher),
        }
    }

    pub(super) async fn create_table(config: &DocintakeConfig) -> Result<(), ServerError> {
        let table_name = config.documents.table_name.as_deref().ok_or_else(|| {
            ServerError::Config(
                "create-table requires [documents] table_name or DYNAMODB_TABLE".into(),
            )
        })?;

        let sdk_config = build_sdk_config(&config.aws).await;
        let store = DynamoDocumentStore::from_sdk_config(
            dynamo_config(config, config.aws.clone()),
            &sdk_config,
        );

        docintake_aws::create_table(store.client(), table_name)
            .await
            .map_err(|e| ServerError::Backend(format!("create table {table_name}: {e}")))?;

        info!(table = %table_name, "documents table ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use docintake_core::{DocumentRecord, IntakeRequest};

    use super::*;

    #[tokio::test]
    async fn memory_backend_is_bounded() {
        let config: DocintakeConfig =
            toml::from_str("[backend]\nkind = \"memory\"\nmemory_capacity = 1").unwrap();
        let backends = create_backends(&config).await.unwrap();

        let first = DocumentRecord::new("doc_1_a", &IntakeRequest::default(), Utc::now());
        let second = DocumentRecord::new("doc_2_b", &IntakeRequest::default(), Utc::now());
        backends.store.put(&first).await.unwrap();
        assert!(backends.store.put(&second).await.is_err());
    }

    #[cfg(not(feature = "aws"))]
    #[tokio::test]
    async fn default_aws_backend_needs_feature() {
        let config: DocintakeConfig = toml::from_str("").unwrap();
        assert!(matches!(
            create_backends(&config).await,
            Err(ServerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn create_table_without_table_name_fails() {
        let config: DocintakeConfig = toml::from_str("").unwrap();
        let err = create_documents_table(&config).await.unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
