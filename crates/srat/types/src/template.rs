//! Template catalog: per-category field descriptors for item details
//!
//! Templates are administrator-editable and unversioned. An item keeps
//! whatever field keys it was entered with; editing a template never
//! rewrites stored items.

use crate::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Input kind of a template field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Textarea,
}

impl FieldType {
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
        }
    }

    /// Whether `value` is acceptable input for this field type.
    /// Numbers must parse as finite decimals, dates as `YYYY-MM-DD`.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            FieldType::Text | FieldType::Textarea => true,
            FieldType::Number => value.parse::<f64>().map(f64::is_finite).unwrap_or(false),
            FieldType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a field type name is not recognized
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            "textarea" => Ok(FieldType::Textarea),
            _ => Err(UnknownFieldType(s.to_string())),
        }
    }
}

/// One typed field of a category template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldType::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldType::Number)
    }
}

/// Category name → ordered field descriptors
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Vec<FieldDescriptor>>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field to a category, or replace the descriptor with the
    /// same key in place. Unknown categories are created.
    pub fn add_field(
        &mut self,
        category: impl Into<String>,
        field: FieldDescriptor,
    ) -> Result<(), ValidationError> {
        if field.key.trim().is_empty() {
            return Err(ValidationError::EmptyFieldKey);
        }

        let fields = self.templates.entry(category.into()).or_default();
        match fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => fields.push(field),
        }
        Ok(())
    }

    /// Ordered fields of a category; empty for unknown categories
    pub fn get_fields(&self, category: &str) -> &[FieldDescriptor] {
        self.templates
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a single descriptor
    pub fn field(&self, category: &str, key: &str) -> Option<&FieldDescriptor> {
        self.get_fields(category).iter().find(|f| f.key == key)
    }

    /// Replace a category's whole field list. Keys must be non-blank and
    /// unique; on error the catalog is unchanged.
    pub fn set_fields(
        &mut self,
        category: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if field.key.trim().is_empty() {
                return Err(ValidationError::EmptyFieldKey);
            }
            if !seen.insert(field.key.as_str()) {
                return Err(ValidationError::DuplicateFieldKey(field.key.clone()));
            }
        }
        self.templates.insert(category.into(), fields);
        Ok(())
    }

    /// Remove a field from a category, returning it if present
    pub fn remove_field(&mut self, category: &str, key: &str) -> Option<FieldDescriptor> {
        let fields = self.templates.get_mut(category)?;
        let idx = fields.iter().position(|f| f.key == key)?;
        Some(fields.remove(idx))
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.templates.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Collects `(category, fields)` pairs with [`TemplateCatalog::add_field`]
/// semantics: a repeated key replaces the earlier descriptor in place and
/// blank keys are skipped.
impl<C: Into<String>> FromIterator<(C, Vec<FieldDescriptor>)> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = (C, Vec<FieldDescriptor>)>>(iter: I) -> Self {
        let mut catalog = TemplateCatalog::new();
        for (category, fields) in iter {
            let category = category.into();
            let entry = catalog.templates.entry(category).or_default();
            for field in fields.into_iter().filter(|f| !f.key.trim().is_empty()) {
                match entry.iter_mut().find(|f| f.key == field.key) {
                    Some(existing) => *existing = field,
                    None => entry.push(field),
                }
            }
        }
        catalog
    }
}
