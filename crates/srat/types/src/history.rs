//! Audit trail: the append-only history of a request
//!
//! Every status change appends exactly one [`HistoryEntry`]. The
//! [`History`] container only supports appending and reading, so an entry
//! cannot be removed or rewritten once recorded.

use crate::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded fact: who did what, in which role, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Display name of the actor
    pub who: String,
    pub role: Role,
    /// Human-readable action label ("Forwarded", "Rejected: …")
    pub action: String,
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        who: impl Into<String>,
        role: Role,
        action: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            who: who.into(),
            role,
            action: action.into(),
            at,
        }
    }
}

/// Append-only sequence of history entries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<HistoryEntry>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    /// Whether `earlier` is an unaltered prefix of this history
    pub fn extends(&self, earlier: &History) -> bool {
        self.0.len() >= earlier.0.len() && self.0[..earlier.0.len()] == earlier.0[..]
    }

    /// Action labels in order, handy for display and assertions
    pub fn actions(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.action.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: &str) -> HistoryEntry {
        HistoryEntry::new("Facilitator", Role::Facilitator, action, Utc::now())
    }

    #[test]
    fn append_preserves_order() {
        let mut history = History::new();
        history.append(entry("Submitted"));
        history.append(entry("Forwarded"));
        assert_eq!(history.actions(), vec!["Submitted", "Forwarded"]);
        assert_eq!(history.last().unwrap().action, "Forwarded");
    }

    #[test]
    fn extends_detects_prefix() {
        let mut earlier = History::new();
        earlier.append(entry("Submitted"));

        let mut later = earlier.clone();
        later.append(entry("Forwarded"));

        assert!(later.extends(&earlier));
        assert!(!earlier.extends(&later));

        let mut diverged = History::new();
        diverged.append(entry("Tampered"));
        diverged.append(entry("Forwarded"));
        assert!(!diverged.extends(&earlier));
    }

    #[test]
    fn serializes_as_array() {
        let mut history = History::new();
        history.append(entry("Submitted"));
        let value = serde_json::to_value(&history).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["action"], "Submitted");
    }
}
