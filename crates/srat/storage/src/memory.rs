//! In-memory reference implementations of the storage traits.
//!
//! Deterministic and test-friendly; nothing survives the process.

use crate::traits::{content_digest, verified, AttachmentStore, DatasetStore};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use srat_types::{AttachmentRef, Dataset};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory dataset snapshot.
#[derive(Default)]
pub struct InMemoryDatasetStore {
    snapshot: RwLock<Option<Dataset>>,
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `dataset`.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            snapshot: RwLock::new(Some(dataset)),
        }
    }
}

#[async_trait]
impl DatasetStore for InMemoryDatasetStore {
    async fn load_all(&self) -> StorageResult<Dataset> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| StorageError::Backend("dataset lock poisoned".to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save_all(&self, dataset: &Dataset) -> StorageResult<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| StorageError::Backend("dataset lock poisoned".to_string()))?;
        *guard = Some(dataset.clone());
        Ok(())
    }
}

/// In-memory attachment blobs keyed by digest.
#[derive(Default)]
pub struct InMemoryAttachmentStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> StorageResult<AttachmentRef> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidInput("attachment name is empty".into()));
        }
        let digest = content_digest(&bytes);
        let size = bytes.len() as u64;

        let mut guard = self
            .blobs
            .write()
            .map_err(|_| StorageError::Backend("attachments lock poisoned".to_string()))?;
        guard.entry(digest.clone()).or_insert(bytes);

        Ok(AttachmentRef::new(name.trim(), digest, size))
    }

    async fn get(&self, attachment: &AttachmentRef) -> StorageResult<Vec<u8>> {
        let bytes = {
            let guard = self
                .blobs
                .read()
                .map_err(|_| StorageError::Backend("attachments lock poisoned".to_string()))?;
            guard.get(&attachment.digest).cloned().ok_or_else(|| {
                StorageError::NotFound(format!("attachment {} not found", attachment.digest))
            })?
        };
        verified(attachment, bytes)
    }
}
