//! Document identifier strategies.
//!
//! The default [`TimestampIdGenerator`] produces `doc_<millis>_<suffix>` where
//! the suffix is 9 random lower-case base-36 characters. Uniqueness is only
//! probabilistic: two calls in the same millisecond that draw the same
//! suffix collide, and nothing detects it. [`UuidIdGenerator`] trades the
//! embedded timestamp for 122 random bits.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix shared by all generated document identifiers.
pub const DOCUMENT_ID_PREFIX: &str = "doc_";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces identifiers for new documents.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// `doc_<unix millis>_<9 base-36 chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn generate(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect();
        format!("{DOCUMENT_ID_PREFIX}{millis}_{suffix}")
    }
}

/// `doc_<uuid v4 as 32 hex chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        format!("{DOCUMENT_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
    }
}

/// Configurable choice of [`IdGenerator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Timestamp,
    Uuid,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Timestamp => Box::new(TimestampIdGenerator),
            Self::Uuid => Box::new(UuidIdGenerator),
        }
    }
}
