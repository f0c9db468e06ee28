//! End-to-end test: rejection mid-flow is terminal.

use srat_engine::{Action, WorkflowEngine};
use srat_tests::*;
use srat_types::*;

#[test]
fn pi_rejects_then_nothing_moves() {
    let engine = WorkflowEngine::new();
    let pending = request_with(RequestStatus::PendingPi, "FunderA", &[200.0, 300.0]);

    let rejected = engine
        .attempt(&pending, &actor(Role::Pi), Action::reject("Missing receipts"))
        .unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(
        rejected.history.last().map(|e| e.action.as_str()),
        Some("Rejected: Missing receipts")
    );
    assert_eq!(rejected.history.len(), pending.history.len() + 1);

    let coord = actor(Role::Coordinator);
    assert_eq!(
        engine
            .attempt(&rejected, &coord, Action::CoordinatorApprove)
            .unwrap_err(),
        WorkflowError::NotPermitted
    );
    for role in Role::ALL {
        assert!(engine.allowed_actions(&rejected, &actor(role)).is_empty());
    }
}

#[test]
fn rejection_through_the_desk_keeps_items_and_total() {
    let mut desk = demo_desk();
    let request = desk
        .submit(&actor(Role::FieldStaff), sample_drafts(), RequestMeta::new("FunderA", "General"))
        .unwrap();
    desk.act(&request.id, None, &actor(Role::Facilitator), Action::Forward)
        .unwrap();

    let rejected = desk
        .act(
            &request.id,
            None,
            &actor(Role::Coordinator),
            Action::reject("Duplicate of last month"),
        )
        .unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.items, request.items);
    assert_eq!(rejected.total(), 500.0);
    assert_eq!(rejected.reimbursed, 0.0);

    assert_eq!(
        desk.act(&request.id, None, &actor(Role::Finance), Action::mark_paid(500.0))
            .unwrap_err(),
        WorkflowError::NotPermitted
    );
}

#[test]
fn out_of_scope_coordinator_cannot_reject() {
    let mut desk = demo_desk();
    let request = desk
        .submit(&actor(Role::FieldStaff), sample_drafts(), RequestMeta::new("FunderB", "General"))
        .unwrap();
    desk.act(&request.id, None, &actor(Role::Facilitator), Action::Forward)
        .unwrap();

    assert_eq!(
        desk.act(&request.id, None, &actor(Role::Coordinator), Action::reject("no"))
            .unwrap_err(),
        WorkflowError::NotPermitted
    );
}
