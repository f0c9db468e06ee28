//! History recorder: the single writer of request audit trails
//!
//! Every accepted transition leaves exactly one entry naming the actor,
//! their role, a human-readable action label and the time. Entries are
//! only ever appended.

use chrono::{DateTime, Utc};
use srat_types::{HistoryEntry, Request, User};

pub const SUBMITTED: &str = "Submitted";
pub const FORWARDED: &str = "Forwarded";
pub const COORDINATOR_APPROVED: &str = "Coordinator approved";
pub const PI_APPROVED: &str = "PI approved";

/// History label for a Finance payment
pub fn paid_label(amount: f64) -> String {
    format!("Finance paid {}", amount)
}

/// History label for a rejection
pub fn rejected_label(reason: &str) -> String {
    format!("Rejected: {}", reason)
}

/// Builds and appends history entries
#[derive(Clone, Debug, Default)]
pub struct HistoryRecorder;

impl HistoryRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Build the entry `actor` leaves for `action` at `at`
    pub fn entry(&self, actor: &User, action: impl Into<String>, at: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry::new(actor.name.clone(), actor.role, action, at)
    }

    /// Append an entry for `actor` to the request's history
    pub fn record(
        &self,
        request: &mut Request,
        actor: &User,
        action: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        let entry = self.entry(actor, action, at);
        tracing::trace!(
            request_id = %request.id,
            who = %entry.who,
            role = %entry.role,
            action = %entry.action,
            "History recorded"
        );
        request.history.append(entry);
    }
}
