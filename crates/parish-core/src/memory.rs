//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::error::StoreError;
use crate::repo::Document;
use crate::traits::Store;
use crate::types::{Collection, PushKeyGenerator, RecordId, RecordPath};

type Tree = BTreeMap<Collection, BTreeMap<RecordId, Value>>;

/// A [`Store`] held in process memory.
///
/// Clones share the same data. Useful for tests and for callers that want
/// the accessor semantics without a backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: Arc<Mutex<Tree>>,
    keys: Arc<PushKeyGenerator>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value at `path`, bypassing document validation.
    pub fn insert_raw(&self, path: &RecordPath, value: Value) {
        self.tree()
            .entry(path.collection())
            .or_default()
            .insert(path.id().clone(), value);
    }

    /// Returns the raw stored value at `path`.
    pub fn raw(&self, path: &RecordPath) -> Option<Value> {
        self.tree()
            .get(&path.collection())
            .and_then(|c| c.get(path.id()))
            .cloned()
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn generate_key(&self) -> RecordId {
        self.keys.next_key()
    }

    async fn set(&self, path: &RecordPath, document: &Document) -> Result<()> {
        self.insert_raw(path, document.clone().into_value());
        debug!(%path, "Stored document in memory");
        Ok(())
    }

    async fn update(&self, path: &RecordPath, changes: &Document) -> Result<()> {
        let mut tree = self.tree();
        let stored = tree
            .get_mut(&path.collection())
            .and_then(|c| c.get_mut(path.id()))
            .ok_or_else(|| StoreError::not_found(path))?;

        match stored {
            Value::Object(map) => {
                for (key, value) in changes.as_map() {
                    map.insert(key.clone(), value.clone());
                }
            }
            other => *other = changes.clone().into_value(),
        }

        Ok(())
    }

    async fn remove(&self, path: &RecordPath) -> Result<()> {
        if let Some(c) = self.tree().get_mut(&path.collection()) {
            c.remove(path.id());
        }
        Ok(())
    }

    async fn get(&self, path: &RecordPath) -> Result<Option<Value>> {
        Ok(self.raw(path))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<(RecordId, Value)>> {
        Ok(self
            .tree()
            .get(&collection)
            .map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> RecordPath {
        RecordPath::new(s).unwrap()
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update(&path("priests/nope"), &Document::new(json!({"a": 1})).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn remove_absent_succeeds() {
        let store = MemoryStore::new();
        store.remove(&path("priests/nope")).await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store
            .set(&path("announcements/a"), &Document::new(json!({"content": "x"})).unwrap())
            .await
            .unwrap();
        assert_eq!(
            other.get(&path("announcements/a")).await.unwrap(),
            Some(json!({"content": "x"}))
        );
    }
}
