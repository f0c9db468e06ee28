//! Property tests: random action sequences against the workflow engine.
//!
//! Whatever the sequence, totals stay derived from items, history only
//! grows by appending, status never moves backwards, and anything off the
//! permission table is refused.

use proptest::prelude::*;
use srat_engine::{Action, ActionKind, PermissionMatrix, WorkflowEngine};
use srat_tests::*;
use srat_types::*;
use std::collections::{BTreeSet, VecDeque};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A coordinator scoped to every funder, so scoping never masks the table
fn broad_actor(role: Role) -> User {
    let user = actor(role);
    if role == Role::Coordinator {
        user.with_fund_sources(["FunderA", "FunderB"])
    } else {
        user
    }
}

fn item_sum(request: &Request) -> f64 {
    request.items.iter().map(|i| i.amount).sum()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Total, history and status invariants hold across any sequence of attempts.
    #[test]
    fn random_sequences_preserve_invariants(
        amounts in arb_amounts(),
        funder in arb_funder(),
        steps in proptest::collection::vec((arb_role(), arb_action()), 0..16),
    ) {
        let engine = WorkflowEngine::new();
        let mut current = request_with(RequestStatus::PendingFacilitator, &funder, &amounts);
        let expected_total = item_sum(&current);

        for (role, action) in steps {
            let before = current.clone();
            match engine.attempt(&current, &actor(role), action) {
                Ok(next) => {
                    prop_assert_eq!(next.history.len(), before.history.len() + 1);
                    prop_assert!(next.history.extends(&before.history));
                    prop_assert!(next.status.rank() > before.status.rank());
                    prop_assert_eq!(next.version, before.version + 1);
                    prop_assert_eq!(&next.items, &before.items);
                    current = next;
                }
                Err(_) => {
                    prop_assert_eq!(&current, &before);
                }
            }
            prop_assert_eq!(current.total(), expected_total);
            prop_assert_eq!(current.total(), item_sum(&current));
        }
    }

    /// Anything other than the owned forward action (or Reject alongside it) is refused.
    #[test]
    fn off_table_attempts_are_not_permitted(
        role in arb_role(),
        status in arb_status(),
        kind in arb_kind(),
        funder in arb_funder(),
    ) {
        let engine = WorkflowEngine::new();
        let request = request_with(status, &funder, &[100.0]);
        let owned = PermissionMatrix::forward_action(role, status);
        let on_table = !status.is_terminal()
            && owned.is_some()
            && (owned == Some(kind) || kind == ActionKind::Reject);

        let result = engine.attempt(&request, &broad_actor(role), action_of(kind));
        if on_table {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err(), WorkflowError::NotPermitted);
        }
    }

    /// Retrying an action against the stored request is refused and applies once.
    #[test]
    fn retry_applies_once(step in 0usize..4, reject in any::<bool>()) {
        let chain = [
            (Role::Facilitator, ActionKind::Forward),
            (Role::Coordinator, ActionKind::CoordinatorApprove),
            (Role::Pi, ActionKind::PiApprove),
            (Role::Finance, ActionKind::MarkPaid),
        ];

        let mut desk = demo_desk();
        let request = desk
            .submit(&actor(Role::FieldStaff), sample_drafts(), RequestMeta::new("FunderA", "General"))
            .unwrap();
        for (role, kind) in &chain[..step] {
            desk.act(&request.id, None, &actor(*role), action_of(*kind)).unwrap();
        }

        let (role, kind) = chain[step];
        let kind = if reject { ActionKind::Reject } else { kind };
        let first = desk.act(&request.id, None, &actor(role), action_of(kind)).unwrap();
        let second = desk.act(&request.id, None, &actor(role), action_of(kind));

        prop_assert_eq!(second.unwrap_err(), WorkflowError::NotPermitted);
        let stored = desk.dataset().request(&request.id).unwrap();
        prop_assert_eq!(stored, &first);
        prop_assert_eq!(stored.history.len(), step + 2);
        let expected_paid = if kind == ActionKind::MarkPaid { 500.0 } else { 0.0 };
        prop_assert_eq!(stored.reimbursed, expected_paid);
    }
}

// ---------------------------------------------------------------------------
// Reachability
// ---------------------------------------------------------------------------

/// Every (role, action) pair that succeeds on a request in `status`
fn successors(engine: &WorkflowEngine, status: RequestStatus) -> Vec<(ActionKind, RequestStatus)> {
    let request = request_with(status, "FunderA", &[100.0]);
    let mut out = Vec::new();
    for role in Role::ALL {
        for kind in ActionKind::ALL {
            if let Ok(next) = engine.attempt(&request, &broad_actor(role), action_of(kind)) {
                out.push((kind, next.status));
            }
        }
    }
    out
}

#[test]
fn only_the_approval_chain_reaches_paid() {
    let engine = WorkflowEngine::new();
    let mut queue = VecDeque::from([(RequestStatus::PendingFacilitator, Vec::<ActionKind>::new())]);
    let mut paths_to_paid = BTreeSet::new();

    while let Some((status, path)) = queue.pop_front() {
        for (kind, next) in successors(&engine, status) {
            assert!(next.rank() > status.rank(), "{status} -> {next} moves backwards");
            let mut path = path.clone();
            path.push(kind);
            if next == RequestStatus::Paid {
                paths_to_paid.insert(path.iter().map(|k| k.label()).collect::<Vec<_>>());
            } else if !next.is_terminal() {
                queue.push_back((next, path));
            }
        }
    }

    assert_eq!(
        paths_to_paid.into_iter().collect::<Vec<_>>(),
        vec![vec!["forward", "coordinator-approve", "pi-approve", "mark-paid"]]
    );
}

#[test]
fn reject_is_reachable_from_every_open_status() {
    let engine = WorkflowEngine::new();
    for status in RequestStatus::ALL {
        let rejectable = successors(&engine, status)
            .iter()
            .any(|(kind, next)| *kind == ActionKind::Reject && *next == RequestStatus::Rejected);
        assert_eq!(rejectable, !status.is_terminal(), "{status}");
    }
}

#[test]
fn terminal_states_refuse_everything() {
    let engine = WorkflowEngine::new();
    for status in [RequestStatus::Paid, RequestStatus::Rejected] {
        assert!(successors(&engine, status).is_empty());
        for role in Role::ALL {
            let request = request_with(status, "FunderA", &[1.0]);
            assert!(engine
                .allowed_actions(&request, &broad_actor(role))
                .is_empty());
        }
    }
}

#[test]
fn missing_payloads_are_validation_errors() {
    let engine = WorkflowEngine::new();
    let finance = request_with(RequestStatus::ApprovedForFinance, "FunderA", &[1.0]);
    let err = engine
        .attempt(&finance, &actor(Role::Finance), Action::MarkPaid { amount: None })
        .unwrap_err();
    assert_eq!(err, WorkflowError::Validation(ValidationError::MissingPaidAmount));

    let pending = request_with(RequestStatus::PendingFacilitator, "FunderA", &[1.0]);
    let err = engine
        .attempt(&pending, &actor(Role::Facilitator), Action::Reject { reason: None })
        .unwrap_err();
    assert_eq!(err, WorkflowError::Validation(ValidationError::MissingReason));
}
