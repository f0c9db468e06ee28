//! Reimbursement requests
//!
//! A Request is created once by field staff and then advanced in place by
//! the workflow engine. Items never change after submission, so the total
//! is always derived rather than stored.

use crate::{
    total_amount, AttachmentRef, History, Item, RequestId, RequestStatus, SignatureArtifact,
    UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submission metadata entered alongside the items
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    /// One of the configured funder names
    pub funder: String,
    pub program: String,
    #[serde(default)]
    pub notes: String,
}

impl RequestMeta {
    pub fn new(funder: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            funder: funder.into(),
            program: program.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A submitted reimbursement request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
    /// Requester's display name at submission time
    pub created_by_name: String,
    /// Never empty once submitted
    pub items: Vec<Item>,
    pub funder: String,
    pub program: String,
    #[serde(default)]
    pub notes: String,
    pub status: RequestStatus,
    pub history: History,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    pub approval_letter: Option<String>,
    /// Signer key (role label) → signature image
    #[serde(default)]
    pub signatures: BTreeMap<String, SignatureArtifact>,
    /// Amount actually paid; zero until Finance marks the request paid
    #[serde(default)]
    pub reimbursed: f64,
    /// Revision counter, bumped on every accepted mutation
    #[serde(default)]
    pub version: u64,
}

impl Request {
    /// Sum of item amounts
    pub fn total(&self) -> f64 {
        total_amount(&self.items)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_paid(&self) -> bool {
        self.status == RequestStatus::Paid
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
