//! Per-collection CRUD and query accessors.
//!
//! [`CollectionHandle`] works on untyped [`Document`]s for a collection
//! chosen at runtime. [`Accessor`] is the typed layer on top, bound to a
//! [`CollectionKind`] so the record shape is known at compile time.
//!
//! Both layers stamp audit fields (`dateTimeStamp` on create, `updated` on
//! patch) and inject `id` from the storage key on read. Neither retries nor
//! caches: every call is one round trip and every `fetch_all` reads the
//! whole collection.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::entities::CollectionKind;
use crate::error::{InvalidInputError, StoreError};
use crate::repo::{CREATED_FIELD, Document, ID_FIELD, Record, UPDATED_FIELD, format_timestamp};
use crate::traits::Store;
use crate::types::{Collection, RecordId, RecordPath};

/// Source of the current time for audit stamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Untyped accessor for one collection.
#[derive(Debug, Clone)]
pub struct CollectionHandle<S> {
    store: S,
    collection: Collection,
    clock: Clock,
}

impl<S: Store> CollectionHandle<S> {
    pub fn new(store: S, collection: Collection) -> Self {
        Self {
            store,
            collection,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for audit stamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn path(&self, id: &RecordId) -> RecordPath {
        RecordPath::from_parts(self.collection, id.clone())
    }

    fn now(&self) -> Value {
        Value::String(format_timestamp((self.clock)()))
    }

    /// Create a record and return the key the store assigned to it.
    ///
    /// Any `id` field in `data` is dropped; keys live in the path, not the body.
    #[instrument(skip(self, data), fields(collection = %self.collection))]
    pub async fn create(&self, mut data: Document) -> Result<RecordId> {
        data.remove(ID_FIELD);
        data.insert(CREATED_FIELD, self.now());

        let id = self.store.generate_key();
        let path = self.path(&id);
        self.store.set(&path, &data).await?;

        debug!(%path, "Created record");
        Ok(id)
    }

    /// Merge `changes` into an existing record, stamping `updated`.
    #[instrument(skip(self, changes), fields(collection = %self.collection))]
    pub async fn patch(&self, id: &RecordId, mut changes: Document) -> Result<()> {
        changes.remove(ID_FIELD);
        changes.insert(UPDATED_FIELD, self.now());

        let path = self.path(id);
        self.store.update(&path, &changes).await?;

        debug!(%path, "Patched record");
        Ok(())
    }

    /// Delete a record. Removing an absent record is not an error.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        let path = self.path(id);
        self.store.remove(&path).await?;

        debug!(%path, "Removed record");
        Ok(())
    }

    /// Fetch one record, or `None` if it does not exist.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn fetch(&self, id: &RecordId) -> Result<Option<Document>> {
        let path = self.path(id);
        Ok(self
            .store
            .get(&path)
            .await?
            .and_then(|value| into_document(&path, value))
            .map(|doc| doc.with_id(id)))
    }

    /// Fetch every record in the collection, in store key order.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn fetch_all(&self) -> Result<Vec<Document>> {
        let entries = self.store.list(self.collection).await?;
        let records: Vec<Document> = entries
            .into_iter()
            .filter_map(|(id, value)| {
                let path = self.path(&id);
                into_document(&path, value).map(|doc| doc.with_id(&id))
            })
            .collect();

        debug!(count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// Fetch every record whose `field` equals `value` exactly.
    ///
    /// Equality is strict JSON equality: the string `"1"` does not match the
    /// number `1`.
    pub async fn search_by_field(&self, field: &str, value: &Value) -> Result<Vec<Document>> {
        let records = self.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }
}

fn into_document(path: &RecordPath, value: Value) -> Option<Document> {
    match value {
        Value::Null => None,
        value => match Document::new(value) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(%path, error = %e, "Skipping malformed record");
                None
            }
        },
    }
}

/// Typed accessor for the collection named by `K`.
///
/// # Example
///
/// ```
/// use parish_core::entities::{Priest, kinds};
/// use parish_core::{Accessor, MemoryStore};
///
/// # async fn example() -> parish_core::Result<()> {
/// let priests = Accessor::<_, kinds::Priests>::new(MemoryStore::new());
/// let id = priests
///     .create(&Priest {
///         name: "Fr. Santos".into(),
///         email: "santos@parish.example".into(),
///         ..Default::default()
///     })
///     .await?;
///
/// let stored = priests.fetch(&id).await?.unwrap();
/// assert_eq!(stored.fields.name, "Fr. Santos");
/// assert!(stored.meta.date_time_stamp.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Accessor<S, K> {
    handle: CollectionHandle<S>,
    _kind: PhantomData<fn() -> K>,
}

impl<S: Clone, K> Clone for Accessor<S, K> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            _kind: PhantomData,
        }
    }
}

impl<S: Store, K: CollectionKind> Accessor<S, K> {
    pub fn new(store: S) -> Self {
        Self {
            handle: CollectionHandle::new(store, K::COLLECTION),
            _kind: PhantomData,
        }
    }

    /// Replace the clock used for audit stamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.handle = self.handle.with_clock(clock);
        self
    }

    /// Returns the untyped handle for the same collection.
    pub fn handle(&self) -> &CollectionHandle<S> {
        &self.handle
    }

    /// Create a record and return its key.
    pub async fn create(&self, data: &K::Record) -> Result<RecordId> {
        self.handle.create(Document::from_serializable(data)?).await
    }

    /// Merge a partial record into an existing one.
    ///
    /// `changes` must serialize to a JSON object; only the fields it carries
    /// are written.
    pub async fn patch<P>(&self, id: &RecordId, changes: &P) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        self.handle
            .patch(id, Document::from_serializable(changes)?)
            .await
    }

    /// Delete a record.
    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        self.handle.remove(id).await
    }

    /// Fetch one record, or `None` if it does not exist.
    pub async fn fetch(&self, id: &RecordId) -> Result<Option<Record<K::Record>>> {
        self.handle.fetch(id).await?.map(decode::<K>).transpose()
    }

    /// Fetch every record in the collection.
    ///
    /// Records that do not decode as `K::Record` are skipped with a warning,
    /// as the untyped layer does for non-object values.
    pub async fn fetch_all(&self) -> Result<Vec<Record<K::Record>>> {
        Ok(decode_all::<K>(self.handle.fetch_all().await?))
    }

    /// Fetch every decodable record whose `field` equals `value` exactly.
    pub async fn search_by_field(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<Record<K::Record>>> {
        let hits = self.handle.search_by_field(field, &value.into()).await?;
        Ok(decode_all::<K>(hits))
    }

    /// Fetch a record that must exist.
    pub(crate) async fn require(&self, id: &RecordId) -> Result<Record<K::Record>> {
        self.fetch(id)
            .await?
            .ok_or_else(|| StoreError::not_found(RecordPath::from_parts(K::COLLECTION, id.clone())).into())
    }
}

fn decode_all<K: CollectionKind>(docs: Vec<Document>) -> Vec<Record<K::Record>> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.id().unwrap_or_default().to_string();
            match decode::<K>(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(collection = %K::COLLECTION, %id, error = %e, "Skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

fn decode<K: CollectionKind>(doc: Document) -> Result<Record<K::Record>> {
    serde_json::from_value(doc.into_value()).map_err(|e| {
        InvalidInputError::Document {
            reason: format!("{} record: {}", K::COLLECTION, e),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use crate::entities::{AppointmentStatus, BaptismAppointment, kinds};
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashSet;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
    }

    fn doc(value: Value) -> Document {
        Document::new(value).unwrap()
    }

    fn handle(store: &MemoryStore) -> CollectionHandle<MemoryStore> {
        CollectionHandle::new(store.clone(), Collection::Announcements).with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn create_returns_distinct_keys() {
        let store = MemoryStore::new();
        let announcements = handle(&store);

        let mut keys = HashSet::new();
        for i in 0..50 {
            let id = announcements
                .create(doc(json!({"content": format!("notice {i}")})))
                .await
                .unwrap();
            assert!(keys.insert(id));
        }
    }

    #[tokio::test]
    async fn create_stamps_creation_time_and_drops_id() {
        let store = MemoryStore::new();
        let announcements = handle(&store);

        let id = announcements
            .create(doc(json!({"id": "caller-key", "content": "Fiesta"})))
            .await
            .unwrap();

        let raw = store
            .raw(&RecordPath::from_parts(Collection::Announcements, id.clone()))
            .unwrap();
        assert_eq!(
            raw,
            json!({"content": "Fiesta", "dateTimeStamp": "2024-03-10T08:00:00.000Z"})
        );
    }

    #[tokio::test]
    async fn create_then_fetch_returns_superset() {
        let store = MemoryStore::new();
        let announcements = handle(&store);
        let data = json!({"content": "Holy Week schedule", "pinned": true});

        let id = announcements.create(doc(data.clone())).await.unwrap();
        let fetched = announcements.fetch(&id).await.unwrap().unwrap();

        for (key, value) in data.as_object().unwrap() {
            assert_eq!(fetched.get(key), Some(value));
        }
        assert!(fetched.get(CREATED_FIELD).is_some());
        assert_eq!(fetched.id(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn patch_merges_and_stamps_update() {
        let store = MemoryStore::new();
        let announcements = handle(&store);
        let id = RecordId::new("k1").unwrap();
        store.insert_raw(
            &RecordPath::from_parts(Collection::Announcements, id.clone()),
            json!({"a": 1, "b": 2}),
        );

        announcements.patch(&id, doc(json!({"b": 3}))).await.unwrap();

        let raw = store
            .raw(&RecordPath::from_parts(Collection::Announcements, id))
            .unwrap();
        assert_eq!(
            raw,
            json!({"a": 1, "b": 3, "updated": "2024-03-10T08:00:00.000Z"})
        );
    }

    #[tokio::test]
    async fn patch_unknown_id_fails() {
        let store = MemoryStore::new();
        let err = handle(&store)
            .patch(&RecordId::new("missing").unwrap(), doc(json!({"b": 3})))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fetch_missing_is_none() {
        let store = MemoryStore::new();
        let fetched = handle(&store)
            .fetch(&RecordId::new("missing").unwrap())
            .await
            .unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::new();
        let announcements = handle(&store);
        let id = announcements.create(doc(json!({"content": "x"}))).await.unwrap();

        announcements.remove(&id).await.unwrap();
        announcements.remove(&id).await.unwrap();
        assert!(announcements.fetch(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_all_injects_keys_and_skips_malformed() {
        let store = MemoryStore::new();
        let announcements = handle(&store);
        for (key, value) in [("k1", json!({"content": "a"})), ("k2", json!(7)), ("k3", json!({"content": "c"}))] {
            store.insert_raw(
                &RecordPath::from_parts(Collection::Announcements, RecordId::new(key).unwrap()),
                value,
            );
        }

        let all = announcements.fetch_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d.id().unwrap()).collect();
        assert_eq!(ids, ["k1", "k3"]);

        // The stored bodies never carry the key.
        let raw = store
            .raw(&RecordPath::new("announcements/k1").unwrap())
            .unwrap();
        assert!(raw.get(ID_FIELD).is_none());
    }

    #[tokio::test]
    async fn typed_reads_skip_undecodable_records() {
        let store = MemoryStore::new();
        for (key, status) in [("k1", "pending"), ("k2", "cancelled")] {
            store.insert_raw(
                &RecordPath::from_parts(Collection::BaptismAppointment, RecordId::new(key).unwrap()),
                json!({"status": status}),
            );
        }

        let baptisms = Accessor::<_, kinds::BaptismAppointments>::new(store);
        assert_eq!(baptisms.handle().fetch_all().await.unwrap().len(), 2);

        let typed = baptisms.fetch_all().await.unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].meta.id.as_ref().map(RecordId::as_str), Some("k1"));

        let pending = baptisms.search_by_field("status", "pending").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert!(baptisms.search_by_field("status", "cancelled").await.unwrap().is_empty());

        // A single read still reports the bad shape.
        assert!(baptisms.fetch(&RecordId::new("k2").unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn fetch_all_empty_collection() {
        let store = MemoryStore::new();
        assert!(handle(&store).fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_uses_strict_equality() {
        let store = MemoryStore::new();
        let announcements = handle(&store);
        announcements.create(doc(json!({"rank": 1}))).await.unwrap();
        announcements.create(doc(json!({"rank": "1"}))).await.unwrap();
        announcements.create(doc(json!({"rank": 2}))).await.unwrap();

        let hits = announcements.search_by_field("rank", &json!(1)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("rank"), Some(&json!(1)));

        let none = announcements.search_by_field("rank", &json!(9)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn typed_accessor_roundtrip() {
        let store = MemoryStore::new();
        let baptisms = Accessor::<_, kinds::BaptismAppointments>::new(store).with_clock(fixed_clock);

        let id = baptisms
            .create(&BaptismAppointment {
                child_s_name: "Ana Reyes".into(),
                status: Some(AppointmentStatus::Pending),
                ..Default::default()
            })
            .await
            .unwrap();

        baptisms
            .patch(&id, &json!({"status": "approved"}))
            .await
            .unwrap();

        let record = baptisms.fetch(&id).await.unwrap().unwrap();
        assert_eq!(record.id(), Some(&id));
        assert_eq!(record.fields.child_s_name, "Ana Reyes");
        assert_eq!(record.fields.status, Some(AppointmentStatus::Approved));
        assert_eq!(
            record.meta.updated.as_deref(),
            Some("2024-03-10T08:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn typed_patch_rejects_non_objects() {
        let store = MemoryStore::new();
        let baptisms = Accessor::<_, kinds::BaptismAppointments>::new(store);
        let err = baptisms
            .patch(&RecordId::new("k").unwrap(), &json!(["status"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidInput(InvalidInputError::Document { .. })
        ));
    }
}
