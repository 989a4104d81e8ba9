//! Filesystem storage for records.
//!
//! Layout: `<root>/<collection>/<key>.json`, one pretty-printed JSON
//! document per file. Writes go through a temp file and a rename, and
//! read-modify-write updates hold an exclusive lock on
//! `<root>/<collection>/.lock` for their duration.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use parish_core::error::{Error, InvalidInputError, StoreError};
use parish_core::repo::Document;
use parish_core::traits::Store;
use parish_core::types::{Collection, PushKeyGenerator, RecordId, RecordPath, StoreKind, StoreUrl};
use parish_core::Result;

const LOCK_FILE: &str = ".lock";

/// A [`Store`] kept in a directory tree.
///
/// # Example
///
/// ```no_run
/// use parish_core::{Collection, CollectionHandle};
/// use parish_file::FileStore;
///
/// # async fn example() -> parish_core::Result<()> {
/// let store = FileStore::new("/var/lib/parish");
/// let priests = CollectionHandle::new(store, Collection::Priests);
/// let all = priests.fetch_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    keys: Arc<PushKeyGenerator>,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            keys: Arc::new(PushKeyGenerator::new()),
        }
    }

    /// Open the store a `file://` URL points at.
    pub fn from_url(url: &StoreUrl) -> Result<Self> {
        match url.kind() {
            StoreKind::Directory(root) => Ok(Self::new(root)),
            StoreKind::Hosted => Err(InvalidInputError::StoreUrl {
                value: url.to_string(),
                reason: "not a directory store".to_string(),
            }
            .into()),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    fn document_path(&self, path: &RecordPath) -> PathBuf {
        self.collection_dir(path.collection())
            .join(format!("{}.json", path.id()))
    }

    /// Take the collection's write lock. Released when the file is dropped.
    fn lock(&self, collection: Collection) -> Result<File> {
        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))?;
        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn read_value(file: &Path) -> Result<Option<Value>> {
        if !file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(file)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_value(file: &Path, value: &Value) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        let temp_path = file.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, file)?;
        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    fn generate_key(&self) -> RecordId {
        self.keys.next_key()
    }

    #[instrument(skip(self, document))]
    async fn set(&self, path: &RecordPath, document: &Document) -> Result<()> {
        let _lock = self.lock(path.collection())?;
        Self::write_value(&self.document_path(path), &document.clone().into_value())?;

        debug!(%path, "Wrote document");
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, path: &RecordPath, changes: &Document) -> Result<()> {
        let _lock = self.lock(path.collection())?;
        let file = self.document_path(path);

        let merged = match Self::read_value(&file)? {
            Some(Value::Null) | None => return Err(StoreError::not_found(path).into()),
            Some(Value::Object(map)) => {
                let mut doc = Document::from(map);
                doc.merge(changes);
                doc
            }
            Some(_) => changes.clone(),
        };
        Self::write_value(&file, &merged.into_value())?;

        debug!(%path, "Merged document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, path: &RecordPath) -> Result<()> {
        let file = self.document_path(path);
        if !file.exists() {
            return Ok(());
        }

        let _lock = self.lock(path.collection())?;
        match fs::remove_file(&file) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!(%path, "Removed document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, path: &RecordPath) -> Result<Option<Value>> {
        Self::read_value(&self.document_path(path))
    }

    #[instrument(skip(self))]
    async fn list(&self, collection: Collection) -> Result<Vec<(RecordId, Value)>> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let file = entry.path();
            let Some(id) = file
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| RecordId::new(s).ok())
            else {
                warn!(file = %file.display(), "Skipping file with invalid record key");
                continue;
            };

            match Self::read_value(&file) {
                Ok(Some(value)) => records.push((id, value)),
                Ok(None) => {}
                Err(Error::InvalidInput(e)) => {
                    warn!(file = %file.display(), error = %e, "Skipping unreadable document");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }
}
