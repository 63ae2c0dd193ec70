//! Meeting record storage.

use crate::{IndexError, Result};
use async_trait::async_trait;
use recap_core::MeetingRecord;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

/// Storage for meeting records.
///
/// Implementations keep records in insertion order; the ranker's stable
/// tie-break relies on it. Persistence is last-writer-wins with no
/// transactional guarantees.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Append a record.
    async fn append(&self, record: MeetingRecord) -> Result<()>;

    /// Get a record by id.
    async fn get(&self, id: &str) -> Result<Option<MeetingRecord>>;

    /// Snapshot of all records in insertion order.
    async fn list(&self) -> Result<Vec<MeetingRecord>>;

    /// Replace an existing record (matched by id).
    async fn update(&self, record: MeetingRecord) -> Result<()>;

    /// Count records.
    async fn count(&self) -> Result<usize>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<MeetingRecord>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn append(&self, record: MeetingRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<MeetingRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<MeetingRecord>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn update(&self, record: MeetingRecord) -> Result<()> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(IndexError::NotFound(record.id)),
        }
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}

/// File-backed store with JSON persistence.
///
/// The file holds a JSON array in insertion order. All mutations are
/// persisted via atomic writes (write to tmp, then rename).
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<Vec<MeetingRecord>>,
}

impl JsonFileStore {
    /// Open a file-backed store.
    ///
    /// If the file at `path` exists, its contents are deserialized into
    /// memory. If the file does not exist, the store starts empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        let records = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), "opened meeting store");

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Atomically persist the current records to disk.
    ///
    /// Writes to a temporary file first, then renames to the target path
    /// to avoid partial writes on crash.
    fn save(&self, records: &[MeetingRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let data = serde_json::to_string_pretty(records)?;
        std::fs::write(&tmp_path, data)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl MeetingStore for JsonFileStore {
    async fn append(&self, record: MeetingRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record);
        self.save(&records)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<MeetingRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<MeetingRecord>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn update(&self, record: MeetingRecord) -> Result<()> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                self.save(&records)?;
                Ok(())
            }
            None => Err(IndexError::NotFound(record.id)),
        }
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
