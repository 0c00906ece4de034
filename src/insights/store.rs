//! Record store with whole-collection JSON persistence
//!
//! Each collection is a single JSON array on disk:
//! ```text
//! ~/.insightdeck/
//! ├── staged.json
//! └── processed.json
//! ```
//! Writes replace the whole file (temp file + rename). Reads of a missing
//! or unreadable file degrade to an empty sequence so the pipeline keeps
//! operating on whatever state is still recoverable.

use crate::error::{Error, Result};
use crate::insights::types::Insight;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Named collection identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Insights awaiting labeling
    Staged,
    /// Insights with finalized labels
    Processed,
}

impl Collection {
    /// File name backing this collection in a `FileStore`
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Staged => "staged.json",
            Collection::Processed => "processed.json",
        }
    }
}

/// Storage port for the two insight collections.
///
/// The lifecycle service is constructed with an implementation of this
/// trait rather than a concrete backend, so tests run against the
/// deterministic `MemoryStore`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a whole collection. Never fails: unreadable state degrades to
    /// an empty sequence.
    async fn read(&self, collection: Collection) -> Vec<Insight>;

    /// Replace a whole collection.
    async fn write(&self, collection: Collection, records: &[Insight]) -> Result<()>;
}

/// JSON-file-backed record store
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at the given directory
    pub async fn new(data_dir: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;
        Ok(Self { data_dir })
    }

    /// Default data directory (~/.insightdeck/)
    pub fn default_dir() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".insightdeck")
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn read(&self, collection: Collection) -> Vec<Insight> {
        let path = self.path_for(collection);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Malformed collection file {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    async fn write(&self, collection: Collection, records: &[Insight]) -> Result<()> {
        let path = self.path_for(collection);
        let json = serde_json::to_string_pretty(records)?;

        // Whole-file replacement: write to a sibling temp file, then rename
        // over the target so readers never observe a partial collection.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            Error::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            Error::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

/// Deterministic in-memory record store for tests and ephemeral use
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Insight>>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self, collection: Collection) -> Vec<Insight> {
        self.collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    async fn write(&self, collection: Collection, records: &[Insight]) -> Result<()> {
        self.collections
            .write()
            .await
            .insert(collection, records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).await.unwrap();

        let records = vec![
            Insight::new("http://a.com", "first"),
            Insight::new("http://b.com", "second"),
        ];
        store.write(Collection::Staged, &records).await.unwrap();

        let back = store.read(Collection::Staged).await;
        assert_eq!(back, records);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).await.unwrap();

        assert!(store.read(Collection::Processed).await.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).await.unwrap();

        tokio::fs::write(dir.path().join("staged.json"), "{not json")
            .await
            .unwrap();

        assert!(store.read(Collection::Staged).await.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_write_replaces_whole_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).await.unwrap();

        let first = vec![Insight::new("http://a.com", "first")];
        store.write(Collection::Staged, &first).await.unwrap();

        let second = vec![Insight::new("http://b.com", "second")];
        store.write(Collection::Staged, &second).await.unwrap();

        assert_eq!(store.read(Collection::Staged).await, second);
    }

    #[tokio::test]
    async fn test_collections_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).await.unwrap();

        let staged = vec![Insight::new("http://a.com", "staged")];
        store.write(Collection::Staged, &staged).await.unwrap();
        store.write(Collection::Processed, &[]).await.unwrap();

        assert_eq!(store.read(Collection::Staged).await, staged);
        assert!(store.read(Collection::Processed).await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let records = vec![Insight::new("http://a.com", "hello")];

        store.write(Collection::Processed, &records).await.unwrap();

        assert_eq!(store.read(Collection::Processed).await, records);
        assert!(store.read(Collection::Staged).await.is_empty());
    }
}
