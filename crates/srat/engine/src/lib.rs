//! Approval Workflow Engine for SRAT
//!
//! Reimbursement requests move through a fixed chain of roles. This crate
//! decides, for a given request, user and action, whether the move is
//! allowed and what the request looks like afterwards.
//!
//! # Architecture
//!
//! - [`WorkflowEngine`]: the single `attempt` entry point; pure, returns a new value
//! - [`PermissionMatrix`]: role × status table of forward actions, plus scoping
//! - [`HistoryRecorder`]: sole writer of the append-only audit trail
//! - [`RequestBuilder`]: turns drafts into a submitted request
//! - [`visibility`]: which requests a user may see
//! - [`ReimbursementDesk`]: owns the dataset and routes every mutation
//!
//! # Example
//!
//! ```rust
//! use srat_engine::{Action, ReimbursementDesk};
//! use srat_types::*;
//!
//! let mut desk = ReimbursementDesk::new(Dataset::empty());
//! let staff = User::new("u5", "field1", "Field Worker A", Role::FieldStaff);
//! let facilitator = User::new("u3", "fac", "Facilitator", Role::Facilitator);
//!
//! let request = desk
//!     .submit(
//!         &staff,
//!         vec![DraftItem::new("Fuel", 120.0)],
//!         RequestMeta::new("FunderA", "General"),
//!     )
//!     .unwrap();
//!
//! let forwarded = desk
//!     .act(&request.id, Some(request.version), &facilitator, Action::Forward)
//!     .unwrap();
//! assert_eq!(forwarded.status, RequestStatus::PendingCoordinator);
//! assert_eq!(forwarded.history.len(), 2);
//! ```

#![deny(unsafe_code)]

pub mod action;
pub mod builder;
pub mod desk;
pub mod history_recorder;
pub mod letter;
pub mod permission;
pub mod state_machine;
pub mod visibility;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use action::{Action, ActionKind};
pub use builder::{RequestBuilder, DEFAULT_FUNDERS};
pub use desk::ReimbursementDesk;
pub use history_recorder::HistoryRecorder;
pub use letter::default_approval_letter;
pub use permission::{Permission, PermissionMatrix};
pub use state_machine::WorkflowEngine;
pub use visibility::{can_see, visible, RequestFilter};
