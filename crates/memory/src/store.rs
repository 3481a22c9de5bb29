use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use docintake_backend::{BackendError, DocumentStore};
use docintake_core::DocumentRecord;

use crate::failure::FailureSwitch;

/// In-memory [`DocumentStore`] backed by a [`DashMap`].
///
/// Unbounded by default. With a capacity, writes of new ids fail once the
/// store is full; overwriting an existing id is always allowed.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    records: DashMap<String, DocumentRecord>,
    capacity: Option<usize>,
    put_calls: AtomicUsize,
    failure: FailureSwitch,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Make every subsequent `put` fail with a service error carrying `message`.
    pub fn fail_puts(&self, message: impl Into<String>) {
        self.failure.set(message);
    }

    pub fn recover(&self) {
        self.failure.clear();
    }

    /// Number of `put` calls, including failed ones.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, record: &DocumentRecord) -> Result<(), BackendError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.failure.check()?;
        if let Some(capacity) = self.capacity
            && self.records.len() >= capacity
            && !self.records.contains_key(&record.id)
        {
            return Err(BackendError::Service(format!(
                "memory store is full ({capacity} records)"
            )));
        }
        self.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>, BackendError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use docintake_core::IntakeRequest;

    use super::*;

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord::new(id, &IntakeRequest::default(), Utc::now())
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryDocumentStore::new();
        store.put(&record("doc_1_a")).await.unwrap();
        let found = store.get("doc_1_a").await.unwrap().unwrap();
        assert_eq!(found.id, "doc_1_a");
        assert!(store.get("doc_missing").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn failing_put_stores_nothing() {
        let store = MemoryDocumentStore::new();
        store.fail_puts("table unavailable");
        let err = store.put(&record("doc_1_a")).await.unwrap_err();
        assert_eq!(err.to_string(), "service error: table unavailable");
        assert!(store.is_empty());
        assert_eq!(store.put_calls(), 1);

        store.recover();
        store.put(&record("doc_1_a")).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn full_store_rejects_new_ids() {
        let store = MemoryDocumentStore::with_capacity(1);
        store.put(&record("doc_1_a")).await.unwrap();
        store.put(&record("doc_1_a")).await.unwrap();

        let err = store.put(&record("doc_2_b")).await.unwrap_err();
        assert!(err.to_string().contains("memory store is full"));
        assert_eq!(store.len(), 1);
        assert!(store.get("doc_2_b").await.unwrap().is_none());
    }
}
