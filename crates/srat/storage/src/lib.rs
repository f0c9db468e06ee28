//! Storage collaborators for SRAT.
//!
//! The workflow engine is pure; everything that touches the outside world
//! lives here behind async traits:
//! - [`DatasetStore`]: whole-snapshot persistence (in-memory, JSON file)
//! - [`UserDirectory`]: credential check over stored accounts
//! - [`AttachmentStore`]: content-addressed receipts (in-memory, filesystem)
//! - [`SignaturePad`]: stroke capture rasterized into a PBM artifact
//!
//! The [`seed`] module carries the demo accounts and stock templates.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod directory;
mod error;
pub mod file;
pub mod memory;
pub mod seed;
pub mod signature;
mod traits;

pub use directory::AccountDirectory;
pub use error::{AuthError, StorageError, StorageResult};
pub use file::{FsAttachmentStore, JsonFileStore};
pub use memory::{InMemoryAttachmentStore, InMemoryDatasetStore};
pub use signature::{Point, SignaturePad, Stroke};
pub use traits::{content_digest, AttachmentStore, DatasetStore, UserDirectory};
