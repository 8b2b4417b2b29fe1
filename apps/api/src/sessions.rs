//! Explicit session store for batch results.
//!
//! Parsed batches live only as long as the process and are scoped to this
//! store — there is no ambient global state. A batch upload creates a
//! session, export reads it, reset deletes it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::pipeline::BatchSummary;

/// In-memory store of parsed batches, keyed by batch id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, BatchSummary>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, summary: BatchSummary) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, summary);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<BatchSummary> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Removes a session; `false` when the id was never stored.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> BatchSummary {
        BatchSummary {
            rows: vec![],
            parsed: 0,
            failed: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let store = SessionStore::new();
        let id = store.insert(summary()).await;
        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.failed, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_deletes_session() {
        let store = SessionStore::new();
        let id = store.insert(summary()).await;
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.get(id).await.is_none());
    }
}
