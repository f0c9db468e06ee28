//! Request builder: turns field staff drafts into a submitted request
//!
//! Item fields are checked once, at entry, against the category template
//! active at that moment. Keys the template does not know are kept as-is;
//! templates evolve by appending and old items keep their keys.

use crate::history_recorder::{HistoryRecorder, SUBMITTED};
use chrono::{DateTime, Utc};
use srat_types::*;
use std::collections::BTreeMap;

/// Funders offered when configuration names none
pub const DEFAULT_FUNDERS: [&str; 2] = ["FunderA", "FunderB"];

/// Assembles submitted requests from draft items
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    funders: Vec<String>,
    recorder: HistoryRecorder,
}

impl RequestBuilder {
    /// A builder accepting only the given funder names.
    /// An empty list accepts any funder.
    pub fn new<I, S>(funders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            funders: funders.into_iter().map(Into::into).collect(),
            recorder: HistoryRecorder::new(),
        }
    }

    pub fn funders(&self) -> &[String] {
        &self.funders
    }

    /// Build a request submitted by `actor` now
    pub fn build(
        &self,
        catalog: &TemplateCatalog,
        drafts: Vec<DraftItem>,
        meta: RequestMeta,
        actor: &User,
    ) -> WorkflowResult<Request> {
        self.build_at(catalog, drafts, meta, actor, Utc::now())
    }

    /// Build a request with an explicit submission time
    pub fn build_at(
        &self,
        catalog: &TemplateCatalog,
        drafts: Vec<DraftItem>,
        meta: RequestMeta,
        actor: &User,
        at: DateTime<Utc>,
    ) -> WorkflowResult<Request> {
        if !can_submit(actor.role) {
            tracing::debug!(actor = %actor.name, role = %actor.role, "Submit not permitted");
            return Err(WorkflowError::NotPermitted);
        }

        if drafts.is_empty() {
            return Err(ValidationError::EmptyItems.into());
        }

        let funder = meta.funder.trim().to_string();
        if !self.funders.is_empty() && !self.funders.iter().any(|f| *f == funder) {
            return Err(ValidationError::UnknownFunder(funder).into());
        }

        let items = drafts
            .into_iter()
            .map(|draft| self.build_item(catalog, draft))
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = Request {
            id: RequestId::generate(),
            created_at: at,
            created_by: actor.id.clone(),
            created_by_name: actor.name.clone(),
            items,
            funder,
            program: meta.program.trim().to_string(),
            notes: meta.notes,
            status: RequestStatus::PendingFacilitator,
            history: History::new(),
            attachments: Vec::new(),
            approval_letter: None,
            signatures: BTreeMap::new(),
            reimbursed: 0.0,
            version: 0,
        };
        self.recorder.record(&mut request, actor, SUBMITTED, at);

        tracing::info!(
            request_id = %request.id,
            actor = %actor.name,
            funder = %request.funder,
            items = request.items.len(),
            total = request.total(),
            "Request submitted"
        );

        Ok(request)
    }

    fn build_item(&self, catalog: &TemplateCatalog, draft: DraftItem) -> Result<Item, ValidationError> {
        if !draft.amount.is_finite() || draft.amount < 0.0 {
            return Err(ValidationError::NegativeAmount(draft.amount));
        }

        if !catalog.contains_category(&draft.category) {
            tracing::debug!(category = %draft.category, "Item category has no template");
        }

        let mut fields = BTreeMap::new();
        for (key, value) in draft.fields {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match catalog.field(&draft.category, &key) {
                Some(descriptor) if !descriptor.field_type.accepts(&value) => {
                    return Err(ValidationError::InvalidFieldValue {
                        category: draft.category,
                        key,
                        expected: descriptor.field_type.to_string(),
                        value,
                    });
                }
                Some(_) => {}
                None => {
                    tracing::debug!(category = %draft.category, key = %key, "Field not in template, kept");
                }
            }
            fields.insert(key, value);
        }

        Ok(Item {
            id: ItemId::generate(),
            category: draft.category,
            amount: draft.amount,
            fields,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FUNDERS)
    }
}

/// Whether `role` may submit requests at all
pub fn can_submit(role: Role) -> bool {
    role == Role::FieldStaff
}
