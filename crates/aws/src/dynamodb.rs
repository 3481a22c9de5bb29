use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use docintake_backend::{BackendError, DocumentStore};
use docintake_core::DocumentRecord;

use crate::attribute::{from_item, to_item};
use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::{AwsError, classify_sdk_error};

/// Partition key attribute of the documents table.
pub const PRIMARY_KEY: &str = "id";

/// Configuration for the `DynamoDB` document store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamoConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Table the records are written to.
    pub table_name: Option<String>,
}

impl DynamoConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            table_name: None,
        }
    }

    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }
}

/// `DynamoDB`-backed [`DocumentStore`].
///
/// One item per record, keyed by the string attribute `id`. Writes are plain
/// `PutItem` calls without condition expressions.
pub struct DynamoDocumentStore {
    config: DynamoConfig,
    client: Client,
}

impl std::fmt::Debug for DynamoDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDocumentStore")
            .field("config", &self.config)
            .field("client", &"<DynamoDbClient>")
            .finish()
    }
}

impl DynamoDocumentStore {
    pub async fn new(config: DynamoConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        Self::from_sdk_config(config, &sdk_config)
    }

    pub fn from_sdk_config(config: DynamoConfig, sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            config,
            client: Client::new(sdk_config),
        }
    }

    /// Create a store with a pre-built client (for testing).
    pub fn with_client(config: DynamoConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn table(&self) -> Result<&str, AwsError> {
        self.config
            .table_name
            .as_deref()
            .ok_or_else(|| AwsError::Configuration("no DynamoDB table configured".to_owned()))
    }
}

#[async_trait]
impl DocumentStore for DynamoDocumentStore {
    #[instrument(skip(self, record), fields(backend = "aws-dynamodb", document_id = %record.id))]
    async fn put(&self, record: &DocumentRecord) -> Result<(), BackendError> {
        let table = self.table()?;
        let item = to_item(record)?;

        debug!(table = %table, "writing document record");

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "DynamoDB put_item failed");
                classify_sdk_error(&err_str)
            })?;

        info!(table = %table, "document record written");
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "aws-dynamodb"))]
    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>, BackendError> {
        let table = self.table()?;

        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(PRIMARY_KEY, AttributeValue::S(id.to_owned()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "DynamoDB get_item failed");
                classify_sdk_error(&err_str)
            })?;

        let Some(item) = result.item() else {
            return Ok(None);
        };
        Ok(Some(from_item(item)?))
    }
}

/// Create the documents table with `id` (String) as partition key and
/// on-demand billing.
///
/// Intended for local development and tests; production tables are
/// provisioned separately. An already existing table is not an error.
pub async fn create_table(client: &Client, table_name: &str) -> Result<(), AwsError> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(PRIMARY_KEY)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| AwsError::Configuration(e.to_string()))?;
    let key_attribute = AttributeDefinition::builder()
        .attribute_name(PRIMARY_KEY)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| AwsError::Configuration(e.to_string()))?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(key_attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            info!(table = %table_name, "DynamoDB table created");
            Ok(())
        }
        Err(err) => {
            let service_err = err.into_service_error();
            if service_err.is_resource_in_use_exception() {
                info!(table = %table_name, "DynamoDB table already exists");
                Ok(())
            } else {
                Err(classify_sdk_error(
                    &DisplayErrorContext(&service_err).to_string(),
                ))
            }
        }
    }
}
