//! AWS backends for the docintake handlers.
//!
//! This crate provides feature-gated implementations of the
//! `docintake-backend` traits:
//!
//! - **S3** (`s3` feature) — pre-signed `PUT` URLs for uploads
//! - **`DynamoDB`** (`dynamodb` feature) — document record persistence
//! - **SQS** (`sqs` feature) — document notifications
//!
//! All backends share a common [`AwsBaseConfig`](config::AwsBaseConfig) for
//! region, endpoint override, and optional STS assume-role credentials.

pub mod auth;
pub mod config;
pub mod error;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "dynamodb")]
pub mod attribute;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "sqs")]
pub mod sqs;

// Re-exports for convenience.
pub use auth::build_sdk_config;
pub use config::AwsBaseConfig;
pub use error::AwsError;

#[cfg(feature = "s3")]
pub use s3::{S3Config, S3UploadSigner};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoConfig, DynamoDocumentStore, create_table};

#[cfg(feature = "sqs")]
pub use sqs::{SqsConfig, SqsPublisher};
