//! Filesystem-backed stores.
//!
//! The dataset lives in a single JSON document; writes go to a sibling
//! temp file that is renamed over the target, so readers never observe a
//! half-written snapshot. Attachments are stored one file per digest.

use crate::traits::{content_digest, verified, AttachmentStore, DatasetStore};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use srat_types::{AttachmentRef, Dataset};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Dataset snapshot in a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dataset".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DatasetStore for JsonFileStore {
    async fn load_all(&self) -> StorageResult<Dataset> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No dataset file, starting empty");
                return Ok(Dataset::empty());
            }
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Dataset::empty());
        }
        let dataset: Dataset = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            requests = dataset.requests.len(),
            users = dataset.users.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    async fn save_all(&self, dataset: &Dataset) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(dataset)?;
        let temp = self.temp_path();
        fs::write(&temp, &json).await?;
        fs::rename(&temp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "Dataset saved");
        Ok(())
    }
}

/// Attachments as files named by their digest under a root directory.
#[derive(Clone, Debug)]
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, digest: &str) -> StorageResult<PathBuf> {
        if digest.is_empty() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StorageError::InvalidInput(format!(
                "malformed attachment digest: {digest}"
            )));
        }
        Ok(self.root.join(digest))
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> StorageResult<AttachmentRef> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidInput("attachment name is empty".into()));
        }
        let digest = content_digest(&bytes);
        let size = bytes.len() as u64;
        let path = self.blob_path(&digest)?;

        if fs::try_exists(&path).await? {
            tracing::debug!(digest = %digest, "Attachment already stored");
        } else {
            fs::create_dir_all(&self.root).await?;
            let temp = path.with_extension("tmp");
            fs::write(&temp, &bytes).await?;
            fs::rename(&temp, &path).await?;
            tracing::debug!(digest = %digest, size, "Attachment stored");
        }

        Ok(AttachmentRef::new(name.trim(), digest, size))
    }

    async fn get(&self, attachment: &AttachmentRef) -> StorageResult<Vec<u8>> {
        let path = self.blob_path(&attachment.digest)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(format!(
                    "attachment {} not found",
                    attachment.digest
                )))
            }
            Err(err) => return Err(err.into()),
        };
        verified(attachment, bytes)
    }
}
