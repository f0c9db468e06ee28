//! State machine: the single entry point for request transitions
//!
//! [`WorkflowEngine::attempt`] takes the current request, the acting user
//! and the intended action, and either returns the advanced request or an
//! error. The input is never modified, so callers can apply or discard the
//! result atomically.
//!
//! Order of checks:
//! 1. Permission (role × status × scope). Failure is `NotPermitted`.
//! 2. Payload validation. Failure is a `ValidationError`.
//! 3. Apply: new status, action-specific fields, one history entry, version bump.

use crate::history_recorder::{
    paid_label, rejected_label, HistoryRecorder, COORDINATOR_APPROVED, FORWARDED, PI_APPROVED,
};
use crate::letter::default_approval_letter;
use crate::{Action, ActionKind, Permission, PermissionMatrix};
use chrono::{DateTime, Utc};
use srat_types::{Request, User, ValidationError, WorkflowError, WorkflowResult};

/// Decides and applies request transitions
#[derive(Clone, Debug, Default)]
pub struct WorkflowEngine {
    permissions: PermissionMatrix,
    recorder: HistoryRecorder,
}

impl WorkflowEngine {
    pub fn new() -> Self {
        Self {
            permissions: PermissionMatrix::new(),
            recorder: HistoryRecorder::new(),
        }
    }

    pub fn permissions(&self) -> &PermissionMatrix {
        &self.permissions
    }

    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }

    /// Attempt `action` on `request` as `actor`, stamped with the current time
    pub fn attempt(&self, request: &Request, actor: &User, action: Action) -> WorkflowResult<Request> {
        self.attempt_at(request, actor, action, Utc::now())
    }

    /// Attempt `action` with an explicit timestamp for the history entry
    pub fn attempt_at(
        &self,
        request: &Request,
        actor: &User,
        action: Action,
        at: DateTime<Utc>,
    ) -> WorkflowResult<Request> {
        let kind = action.kind();

        if let Permission::Denied { reason } = self.permissions.evaluate(actor, request, kind) {
            tracing::debug!(
                request_id = %request.id,
                actor = %actor.name,
                role = %actor.role,
                action = %kind,
                reason = %reason,
                "Action not permitted"
            );
            return Err(WorkflowError::NotPermitted);
        }

        let mut next = request.clone();
        let label = match action {
            Action::Forward => FORWARDED.to_string(),

            Action::CoordinatorApprove => COORDINATOR_APPROVED.to_string(),

            Action::PiApprove { letter } => {
                let letter = letter
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| default_approval_letter(request, actor, at));
                next.approval_letter = Some(letter);
                PI_APPROVED.to_string()
            }

            Action::MarkPaid { amount } => {
                let amount = amount.ok_or(ValidationError::MissingPaidAmount)?;
                if !amount.is_finite() || amount < 0.0 {
                    return Err(ValidationError::NegativeAmount(amount).into());
                }
                next.reimbursed = amount;
                paid_label(amount)
            }

            Action::Reject { reason } => {
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .ok_or(ValidationError::MissingReason)?;
                rejected_label(&reason)
            }
        };

        next.status = PermissionMatrix::target_status(kind);
        next.version += 1;
        self.recorder.record(&mut next, actor, label, at);

        tracing::info!(
            request_id = %next.id,
            actor = %actor.name,
            role = %actor.role,
            from = %request.status,
            to = %next.status,
            "Request transitioned"
        );

        Ok(next)
    }

    /// Actions `actor` may currently take on `request`
    pub fn allowed_actions(&self, request: &Request, actor: &User) -> Vec<ActionKind> {
        self.permissions.allowed_actions(actor, request)
    }
}
