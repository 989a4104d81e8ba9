//! REST-backed store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use parish_core::Result;
use parish_core::error::StoreError;
use parish_core::repo::Document;
use parish_core::traits::Store;
use parish_core::types::{Collection, PushKeyGenerator, RecordId, RecordPath, StoreUrl};

use crate::client::RestClient;

/// A [`Store`] backed by a hosted realtime database.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: RestClient,
    keys: Arc<PushKeyGenerator>,
}

impl RestStore {
    /// Create a store for the database at `base`.
    pub fn new(base: StoreUrl, token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: RestClient::new(base, token)?,
            keys: Arc::new(PushKeyGenerator::new()),
        })
    }

    /// Returns the database URL.
    pub fn url(&self) -> &StoreUrl {
        self.client.base()
    }
}

#[async_trait]
impl Store for RestStore {
    fn generate_key(&self) -> RecordId {
        self.keys.next_key()
    }

    #[instrument(skip(self, document))]
    async fn set(&self, path: &RecordPath, document: &Document) -> Result<()> {
        self.client
            .put(&path.to_string(), &document.clone().into_value())
            .await?;
        debug!(%path, "Wrote document");
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, path: &RecordPath, changes: &Document) -> Result<()> {
        let key = path.to_string();

        // PATCH on an absent node would create it.
        if self.client.get_shallow(&key).await?.is_null() {
            return Err(StoreError::not_found(path).into());
        }

        self.client
            .patch(&key, &changes.clone().into_value())
            .await?;
        debug!(%path, "Merged document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, path: &RecordPath) -> Result<()> {
        self.client.delete(&path.to_string()).await?;
        debug!(%path, "Removed document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, path: &RecordPath) -> Result<Option<Value>> {
        match self.client.get(&path.to_string()).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, collection: Collection) -> Result<Vec<(RecordId, Value)>> {
        let subtree = match self.client.get(collection.as_str()).await? {
            Value::Null => return Ok(Vec::new()),
            Value::Object(map) => map,
            other => {
                warn!(%collection, kind = ?other, "Collection node is not an object");
                return Ok(Vec::new());
            }
        };

        let mut records: Vec<(RecordId, Value)> = subtree
            .into_iter()
            .filter_map(|(key, value)| match RecordId::new(&key) {
                Ok(id) => Some((id, value)),
                Err(e) => {
                    warn!(%collection, key = %key, error = %e, "Skipping entry with invalid key");
                    None
                }
            })
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(records)
    }
}
