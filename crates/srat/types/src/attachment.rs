//! Opaque references to supporting files and signature images

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a supporting file held by an attachment store.
///
/// The digest is the content address; stores resolve it back to bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    /// Original file name, for display
    pub name: String,
    /// Hex-encoded content digest
    pub digest: String,
    pub size: u64,
}

impl AttachmentRef {
    pub fn new(name: impl Into<String>, digest: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            digest: digest.into(),
            size,
        }
    }
}

/// A rasterized signature image produced by signature capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureArtifact {
    pub media_type: String,
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes
    pub data: Vec<u8>,
    /// Hex-encoded content digest of `data`
    pub digest: String,
    pub captured_at: DateTime<Utc>,
}
