//! Record store trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::repo::Document;
use crate::types::{Collection, RecordId, RecordPath};

/// A path-addressed JSON document store.
///
/// This is the whole contract the accessors rely on. There is no query
/// language: filtering happens on the client after [`Store::list`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Produce a new unique key for a record.
    fn generate_key(&self) -> RecordId;

    /// Write the whole document at `path`, replacing anything there.
    async fn set(&self, path: &RecordPath, document: &Document) -> Result<()>;

    /// Merge the top-level fields of `changes` into the document at `path`.
    ///
    /// Fails with a not-found store error if nothing is stored at `path`.
    async fn update(&self, path: &RecordPath, changes: &Document) -> Result<()>;

    /// Delete the document at `path`. Deleting an absent path succeeds.
    async fn remove(&self, path: &RecordPath) -> Result<()>;

    /// Read the value at `path`, or `None` if nothing is stored there.
    async fn get(&self, path: &RecordPath) -> Result<Option<Value>>;

    /// Read the whole collection subtree as `(key, value)` pairs in key order.
    async fn list(&self, collection: Collection) -> Result<Vec<(RecordId, Value)>>;
}
