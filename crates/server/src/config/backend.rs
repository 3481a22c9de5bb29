use serde::Deserialize;

use docintake_core::IdStrategy;

/// Backend family used for signing, persistence and notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// S3, `DynamoDB` and SQS.
    #[default]
    Aws,
    /// In-process implementations for local runs; URLs are not signed and
    /// nothing leaves the server.
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => f.write_str("aws"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Backend selection.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    /// Records and messages the memory backend retains before it starts
    /// rejecting writes (store) or dropping the oldest messages (queue).
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            memory_capacity: default_memory_capacity(),
        }
    }
}

fn default_memory_capacity() -> usize {
    10_000
}

/// Upload URL issuer configuration.
#[derive(Debug, Default, Deserialize)]
pub struct UploadConfig {
    /// Bucket that receives uploads. Required at call time, not at start-up.
    pub bucket_name: Option<String>,
    /// Use path-style S3 addressing (needed by most local S3 emulators).
    #[serde(default)]
    pub force_path_style: bool,
}

/// Document intake configuration.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentsConfig {
    /// `DynamoDB` table holding document records.
    pub table_name: Option<String>,
    /// SQS queue receiving document notifications.
    pub queue_url: Option<String>,
    /// How new document ids are generated.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}
