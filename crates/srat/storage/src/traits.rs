use crate::{AuthError, StorageError, StorageResult};
use async_trait::async_trait;
use srat_types::{AttachmentRef, Dataset, User};

/// Whole-snapshot persistence for the application dataset.
///
/// Last write wins; concurrent writers are resolved by the per-request
/// version check in the desk, not here.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Load the stored snapshot. An empty, unseeded dataset when nothing is stored.
    async fn load_all(&self) -> StorageResult<Dataset>;

    /// Replace the stored snapshot.
    async fn save_all(&self, dataset: &Dataset) -> StorageResult<()>;
}

/// Content-addressed storage for request attachments.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store `bytes` and return a reference keyed by their digest.
    async fn put(&self, name: &str, bytes: Vec<u8>) -> StorageResult<AttachmentRef>;

    /// Fetch the bytes behind a reference, verifying the digest.
    async fn get(&self, attachment: &AttachmentRef) -> StorageResult<Vec<u8>>;
}

/// Resolves credentials to a user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;
}

/// Hex blake3 digest used as the attachment and signature key.
pub fn content_digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub(crate) fn verified(attachment: &AttachmentRef, bytes: Vec<u8>) -> StorageResult<Vec<u8>> {
    let actual = content_digest(&bytes);
    if actual != attachment.digest {
        return Err(StorageError::InvariantViolation(format!(
            "attachment {} digest mismatch: expected {}, found {}",
            attachment.name, attachment.digest, actual
        )));
    }
    Ok(bytes)
}
