//! Line items: one spending entry within a request

use crate::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A submitted line item. Immutable once its request is submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Key into the template catalog
    pub category: String,
    /// Non-negative amount in the request's (unspecified) currency unit
    pub amount: f64,
    /// Category-specific values, keyed by template field key
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// An item as entered by field staff, before the request is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl DraftItem {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Sum of item amounts
pub fn total_amount(items: &[Item]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}
