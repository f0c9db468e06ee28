//! Workflow actions and their payloads

use serde::{Deserialize, Serialize};

/// Payload-free identity of an action, used by the permission matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Forward,
    CoordinatorApprove,
    PiApprove,
    MarkPaid,
    Reject,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Forward,
        ActionKind::CoordinatorApprove,
        ActionKind::PiApprove,
        ActionKind::MarkPaid,
        ActionKind::Reject,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Forward => "forward",
            ActionKind::CoordinatorApprove => "coordinator-approve",
            ActionKind::PiApprove => "pi-approve",
            ActionKind::MarkPaid => "mark-paid",
            ActionKind::Reject => "reject",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An action a user attempts on a request, carrying its required payload.
///
/// Payload fields are optional at the type level so that a missing value
/// surfaces as a validation error instead of being impossible to express
/// at the call site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Facilitator passes the request to the coordinator
    Forward,
    /// Coordinator approves within their fund-source scope
    CoordinatorApprove,
    /// PI (or Admin) approves with an approval letter; a default letter
    /// is generated when none is given
    PiApprove { letter: Option<String> },
    /// Finance records the amount actually paid
    MarkPaid { amount: Option<f64> },
    /// Any role owning the current step may reject with a reason
    Reject { reason: Option<String> },
}

impl Action {
    pub fn pi_approve(letter: impl Into<String>) -> Self {
        Action::PiApprove {
            letter: Some(letter.into()),
        }
    }

    pub fn mark_paid(amount: f64) -> Self {
        Action::MarkPaid {
            amount: Some(amount),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Action::Reject {
            reason: Some(reason.into()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Forward => ActionKind::Forward,
            Action::CoordinatorApprove => ActionKind::CoordinatorApprove,
            Action::PiApprove { .. } => ActionKind::PiApprove,
            Action::MarkPaid { .. } => ActionKind::MarkPaid,
            Action::Reject { .. } => ActionKind::Reject,
        }
    }
}
