// src/store/memory.rs
use super::DocumentStore;
use crate::error::{StoreError, StoreResult};
use crate::message::{Filter, Message};

use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-process store used for dry runs and tests. Documents keep insertion
/// order within a collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Message>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collections<T>(&self, f: impl FnOnce(&mut BTreeMap<String, Vec<Message>>) -> T) -> T {
        // A poisoned lock only means another test thread panicked mid-call.
        let mut guard = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    fn matching(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Message>> {
        self.with_collections(|collections| -> StoreResult<Vec<Message>> {
            let docs = collections
                .get(collection)
                .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;
            let mut found = Vec::new();
            for doc in docs {
                if filter.is_empty() || filter.matches(&serde_json::to_value(doc)?) {
                    found.push(doc.clone());
                    if limit.is_some_and(|l| found.len() >= l) {
                        break;
                    }
                }
            }
            Ok(found)
        })
    }
}

impl DocumentStore for MemoryStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.with_collections(|c| c.keys().cloned().collect()))
    }

    async fn drop_collection(&self, name: &str) -> StoreResult<()> {
        self.with_collections(|c| {
            c.remove(name)
                .map(|_| ())
                .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
        })
    }

    async fn create_collection(&self, name: &str) -> StoreResult<()> {
        self.with_collections(|c| {
            c.entry(name.to_string()).or_default();
        });
        Ok(())
    }

    async fn insert_many(&self, collection: &str, docs: &[Message]) -> StoreResult<Vec<String>> {
        self.with_collections(|collections| -> StoreResult<Vec<String>> {
            let stored = collections
                .get_mut(collection)
                .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;
            let mut ids = Vec::with_capacity(docs.len());
            for doc in docs {
                if stored.iter().any(|s| s.id == doc.id) {
                    return Err(StoreError::DuplicateId(doc.id.clone()));
                }
                stored.push(doc.clone());
                ids.push(doc.id.clone());
            }
            Ok(ids)
        })
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Message>> {
        Ok(self.matching(collection, filter, Some(1))?.pop())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Message>> {
        self.matching(collection, filter, None)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        Ok(self.matching(collection, filter, None)?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, user: &str) -> Message {
        Message {
            id: id.into(),
            user_id: user.into(),
            user_age: 40,
            topic: "education".into(),
            message_text: "x".into(),
            timestamp: "2025-11-01T08:00:00".into(),
        }
    }

    #[tokio::test]
    async fn drop_missing_collection_fails() {
        let store = MemoryStore::new();
        let err = store.drop_collection("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::CollectionNotFound(_)));
    }

    #[tokio::test]
    async fn insert_requires_collection() {
        let store = MemoryStore::new();
        let err = store.insert_many("c", &[msg("msg_001", "user_001")]).await.unwrap_err();
        assert!(matches!(err, StoreError::CollectionNotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = MemoryStore::new();
        store.create_collection("c").await.unwrap();
        store.insert_many("c", &[msg("msg_001", "user_001")]).await.unwrap();
        let err = store.insert_many("c", &[msg("msg_001", "user_002")]).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "msg_001"));
    }

    #[tokio::test]
    async fn find_and_count_apply_filter() {
        let store = MemoryStore::new();
        store.create_collection("c").await.unwrap();
        let ids = store
            .insert_many(
                "c",
                &[msg("msg_001", "user_002"), msg("msg_002", "user_001"), msg("msg_003", "user_001")],
            )
            .await
            .unwrap();
        assert_eq!(ids, vec!["msg_001", "msg_002", "msg_003"]);

        let by_user = Filter::eq("user_id", "user_001");
        let first = store.find_one("c", &by_user).await.unwrap().unwrap();
        assert_eq!(first.id, "msg_002");
        assert_eq!(store.find("c", &by_user).await.unwrap().len(), 2);
        assert_eq!(store.count("c", &Filter::all()).await.unwrap(), 3);
        assert!(store.find_one("c", &Filter::eq("user_id", "user_404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_is_idempotent_and_drop_clears() {
        let store = MemoryStore::new();
        store.create_collection("c").await.unwrap();
        store.insert_many("c", &[msg("msg_001", "user_001")]).await.unwrap();
        store.create_collection("c").await.unwrap();
        assert_eq!(store.count("c", &Filter::all()).await.unwrap(), 1);

        store.drop_collection("c").await.unwrap();
        assert!(store.list_collections().await.unwrap().is_empty());
    }
}
