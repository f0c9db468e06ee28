//! Permission matrix: which role may do what, in which status
//!
//! Every role owns at most one forward action per status. Reject is not a
//! separate capability: it is available exactly where the actor owns the
//! forward action. Role-specific scoping (a coordinator's fund sources)
//! applies to both. Evaluation is pure.

use crate::ActionKind;
use srat_types::{Request, RequestStatus, Role, User};

/// Outcome of a permission check.
///
/// The denial reason is for logs only; it is never surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied { reason: String },
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }

    fn denied(reason: impl Into<String>) -> Self {
        Permission::Denied {
            reason: reason.into(),
        }
    }
}

/// The role × status table of forward actions
#[derive(Clone, Debug, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    pub fn new() -> Self {
        Self
    }

    /// The forward action `role` owns while a request sits in `status`
    pub fn forward_action(role: Role, status: RequestStatus) -> Option<ActionKind> {
        match (status, role) {
            (RequestStatus::PendingFacilitator, Role::Facilitator) => Some(ActionKind::Forward),
            (RequestStatus::PendingCoordinator, Role::Coordinator) => {
                Some(ActionKind::CoordinatorApprove)
            }
            (RequestStatus::PendingPi, Role::Pi | Role::Admin) => Some(ActionKind::PiApprove),
            (RequestStatus::ApprovedForFinance, Role::Finance) => Some(ActionKind::MarkPaid),
            _ => None,
        }
    }

    /// The status a forward action leads to
    pub fn target_status(kind: ActionKind) -> RequestStatus {
        match kind {
            ActionKind::Forward => RequestStatus::PendingCoordinator,
            ActionKind::CoordinatorApprove => RequestStatus::PendingPi,
            ActionKind::PiApprove => RequestStatus::ApprovedForFinance,
            ActionKind::MarkPaid => RequestStatus::Paid,
            ActionKind::Reject => RequestStatus::Rejected,
        }
    }

    /// Check whether `actor` may perform `kind` on `request` as it stands now
    pub fn evaluate(&self, actor: &User, request: &Request, kind: ActionKind) -> Permission {
        if request.status.is_terminal() {
            return Permission::denied(format!("request is {}", request.status));
        }

        let Some(owned) = Self::forward_action(actor.role, request.status) else {
            return Permission::denied(format!(
                "{} holds no action while {}",
                actor.role, request.status
            ));
        };

        if kind != owned && kind != ActionKind::Reject {
            return Permission::denied(format!(
                "{} may only {} while {}",
                actor.role, owned, request.status
            ));
        }

        if !self.in_scope(actor, request) {
            return Permission::denied(format!(
                "funder {} outside fund-source scope",
                request.funder
            ));
        }

        Permission::Granted
    }

    /// Every action `actor` may currently take on `request`, forward action first
    pub fn allowed_actions(&self, actor: &User, request: &Request) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.evaluate(actor, request, *kind).is_granted())
            .collect()
    }

    fn in_scope(&self, actor: &User, request: &Request) -> bool {
        match actor.role {
            Role::Coordinator => actor.covers_funder(&request.funder),
            _ => true,
        }
    }
}
