use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::persist::{StoreError, read_json_list, write_json_atomic};

use super::model::MetadataRecord;

/// Store handle shared between the fetch orchestrator and the editor.
pub type SharedStore = Arc<Mutex<MetadataStore>>;

/// File-backed map from audio file path to [`MetadataRecord`].
///
/// Keys compare case-insensitively. Every successful [`upsert`](Self::upsert)
/// rewrites the whole backing file before returning.
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
    records: Vec<MetadataRecord>,
    index: HashMap<String, usize>,
}

/// Normalized lookup key, or `None` for an empty/whitespace path.
fn key_for(file_path: &str) -> Option<String> {
    if file_path.trim().is_empty() {
        None
    } else {
        Some(file_path.to_lowercase())
    }
}

impl MetadataStore {
    /// An empty store that will persist to `path` on first write.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Load the store from `path`.
    ///
    /// A missing or empty file gives an empty store. A file that exists but
    /// cannot be parsed is reported as [`StoreError::CorruptState`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::empty(path);
        let loaded: Vec<MetadataRecord> = read_json_list(&store.path)?;
        let total = loaded.len();
        for record in loaded {
            store.insert(record);
        }
        tracing::debug!(
            path = %store.path.display(),
            records = store.records.len(),
            skipped = total - store.records.len(),
            "loaded metadata store"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in persisted order.
    pub fn records(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.records.iter()
    }

    /// Case-insensitive lookup. Empty paths never match.
    pub fn get(&self, file_path: &str) -> Option<&MetadataRecord> {
        let key = key_for(file_path)?;
        self.index.get(&key).map(|&i| &self.records[i])
    }

    /// Insert or replace the record for `record.file_path` and persist.
    ///
    /// Records with an empty path are ignored. If the file cannot be written
    /// the in-memory change is rolled back and the error returned.
    pub fn upsert(&mut self, record: MetadataRecord) -> Result<(), StoreError> {
        let Some(key) = key_for(&record.file_path) else {
            return Ok(());
        };

        let previous = self.insert(record);
        if let Err(e) = self.save() {
            self.undo(&key, previous);
            return Err(e);
        }
        Ok(())
    }

    /// Insert without persisting; returns the replaced record, if any.
    fn insert(&mut self, record: MetadataRecord) -> Option<MetadataRecord> {
        let key = key_for(&record.file_path)?;
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.records[i], record)),
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    fn undo(&mut self, key: &str, previous: Option<MetadataRecord>) {
        match previous {
            Some(old) => {
                if let Some(&i) = self.index.get(key) {
                    self.records[i] = old;
                }
            }
            None => {
                // A fresh insert always lands at the end.
                self.index.remove(key);
                self.records.pop();
            }
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        write_json_atomic(&self.path, &self.records)?;
        tracing::debug!(
            path = %self.path.display(),
            records = self.records.len(),
            "saved metadata store"
        );
        Ok(())
    }
}
