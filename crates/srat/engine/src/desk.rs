//! Reimbursement desk: the coordinating layer over the dataset
//!
//! The desk owns the application state and is the only place it changes.
//! Status changes go through [`WorkflowEngine::attempt`]; the desk stores
//! the returned value only when the attempt succeeds, so a failed call
//! leaves the dataset exactly as it was. Persisting the dataset is the
//! caller's job (see `srat-storage`).

use crate::{
    visibility, Action, ActionKind, RequestBuilder, RequestFilter, WorkflowEngine,
};
use srat_types::*;

/// Coordinates submissions, transitions and administration over a dataset
#[derive(Clone, Debug)]
pub struct ReimbursementDesk {
    dataset: Dataset,
    engine: WorkflowEngine,
    builder: RequestBuilder,
}

impl ReimbursementDesk {
    /// A desk over `dataset` accepting the default funders
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            engine: WorkflowEngine::new(),
            builder: RequestBuilder::default(),
        }
    }

    /// A desk accepting only the given funders
    pub fn with_funders<I, S>(dataset: Dataset, funders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dataset,
            engine: WorkflowEngine::new(),
            builder: RequestBuilder::new(funders),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    pub fn funders(&self) -> &[String] {
        self.builder.funders()
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.dataset.templates
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Submit a new request. It is placed first, newest-first.
    pub fn submit(
        &mut self,
        actor: &User,
        drafts: Vec<DraftItem>,
        meta: RequestMeta,
    ) -> WorkflowResult<Request> {
        let request = self
            .builder
            .build(&self.dataset.templates, drafts, meta, actor)?;
        self.dataset.requests.insert(0, request.clone());
        Ok(request)
    }

    /// Attempt a workflow action on a stored request.
    ///
    /// When `expected_version` is given, the stored request must still be
    /// at that version, otherwise the call fails with `VersionConflict`.
    pub fn act(
        &mut self,
        id: &RequestId,
        expected_version: Option<u64>,
        actor: &User,
        action: Action,
    ) -> WorkflowResult<Request> {
        let current = self.stored(id)?;
        if let Some(expected) = expected_version {
            if current.version != expected {
                tracing::debug!(
                    request_id = %id,
                    expected,
                    found = current.version,
                    "Stale request version"
                );
                return Err(WorkflowError::VersionConflict {
                    id: id.clone(),
                    expected,
                    found: current.version,
                });
            }
        }

        let next = self.engine.attempt(current, actor, action)?;
        self.replace(next.clone());
        Ok(next)
    }

    /// A single request, if `actor` may see it
    pub fn request_for(&self, actor: &User, id: &RequestId) -> WorkflowResult<&Request> {
        let request = self.stored(id)?;
        if !visibility::can_see(actor, request) {
            return Err(WorkflowError::NotPermitted);
        }
        Ok(request)
    }

    /// Requests visible to `actor`, narrowed by `filter`, newest first
    pub fn visible_requests(&self, actor: &User, filter: &RequestFilter) -> Vec<&Request> {
        filter.apply(visibility::visible(&self.dataset.requests, actor))
    }

    /// Actions `actor` may take on a request right now
    pub fn allowed_actions(&self, actor: &User, id: &RequestId) -> WorkflowResult<Vec<ActionKind>> {
        let request = self.stored(id)?;
        Ok(self.engine.allowed_actions(request, actor))
    }

    /// Bind a stored attachment to a request the actor can see.
    /// Status and history are unchanged.
    pub fn attach(
        &mut self,
        id: &RequestId,
        actor: &User,
        attachment: AttachmentRef,
    ) -> WorkflowResult<Request> {
        let mut next = self.request_for(actor, id)?.clone();
        tracing::info!(
            request_id = %id,
            actor = %actor.name,
            file = %attachment.name,
            "Attachment added"
        );
        next.attachments.push(attachment);
        next.version += 1;
        self.replace(next.clone());
        Ok(next)
    }

    /// Record the actor's signature on a request they can see, keyed by role.
    /// A later signature from the same role replaces the earlier one.
    pub fn sign(
        &mut self,
        id: &RequestId,
        actor: &User,
        artifact: SignatureArtifact,
    ) -> WorkflowResult<Request> {
        let mut next = self.request_for(actor, id)?.clone();
        tracing::info!(request_id = %id, signer = %actor.role, "Signature saved");
        next.signatures
            .insert(actor.role.label().to_string(), artifact);
        next.version += 1;
        self.replace(next.clone());
        Ok(next)
    }

    // ── Administration ───────────────────────────────────────────────

    pub fn add_template_field(
        &mut self,
        actor: &User,
        category: &str,
        field: FieldDescriptor,
    ) -> WorkflowResult<()> {
        require_admin(actor)?;
        let key = field.key.clone();
        self.dataset.templates.add_field(category, field)?;
        tracing::info!(category, key = %key, "Template field saved");
        Ok(())
    }

    pub fn set_template_fields(
        &mut self,
        actor: &User,
        category: &str,
        fields: Vec<FieldDescriptor>,
    ) -> WorkflowResult<()> {
        require_admin(actor)?;
        let count = fields.len();
        self.dataset.templates.set_fields(category, fields)?;
        tracing::info!(category, fields = count, "Template replaced");
        Ok(())
    }

    pub fn remove_template_field(
        &mut self,
        actor: &User,
        category: &str,
        key: &str,
    ) -> WorkflowResult<Option<FieldDescriptor>> {
        require_admin(actor)?;
        let removed = self.dataset.templates.remove_field(category, key);
        if removed.is_some() {
            tracing::info!(category, key, "Template field removed");
        }
        Ok(removed)
    }

    /// Create a user account. Usernames are unique.
    pub fn create_user(&mut self, actor: &User, input: NewUser) -> WorkflowResult<User> {
        require_admin(actor)?;
        let username = input.username.trim().to_string();
        if self.dataset.account_by_username(&username).is_some() {
            return Err(ValidationError::DuplicateUsername(username).into());
        }

        let account = input.into_account(UserId::generate())?;
        let user = account.user.clone();
        self.dataset.users.push(account);
        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// All users, for administrators
    pub fn users(&self, actor: &User) -> WorkflowResult<Vec<&User>> {
        require_admin(actor)?;
        Ok(self.dataset.users.iter().map(|a| &a.user).collect())
    }

    // ── Seeding ──────────────────────────────────────────────────────

    /// Install `seed`'s users and templates into a dataset that was never
    /// seeded. Existing users, templates and requests are kept. Returns
    /// whether anything was installed.
    pub fn seed_if_empty(&mut self, seed: Dataset) -> bool {
        if self.dataset.seeded {
            return false;
        }
        if self.dataset.users.is_empty() {
            self.dataset.users = seed.users;
        }
        if self.dataset.templates.is_empty() {
            self.dataset.templates = seed.templates;
        }
        self.dataset.seeded = true;
        tracing::info!(
            users = self.dataset.users.len(),
            categories = self.dataset.templates.len(),
            "Dataset seeded"
        );
        true
    }

    // ── Internal helpers ─────────────────────────────────────────────

    fn stored(&self, id: &RequestId) -> WorkflowResult<&Request> {
        self.dataset
            .request(id)
            .ok_or_else(|| WorkflowError::RequestNotFound(id.clone()))
    }

    fn replace(&mut self, next: Request) {
        if let Some(slot) = self.dataset.request_mut(&next.id) {
            *slot = next;
        }
    }
}

fn require_admin(actor: &User) -> WorkflowResult<()> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        tracing::debug!(actor = %actor.name, role = %actor.role, "Administration not permitted");
        Err(WorkflowError::NotPermitted)
    }
}
