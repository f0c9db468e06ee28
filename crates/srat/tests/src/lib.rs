//! Shared fixtures and proptest strategies for SRAT cross-crate tests.

use chrono::Utc;
use proptest::prelude::*;
use srat_engine::{Action, ActionKind, ReimbursementDesk};
use srat_storage::seed::demo_dataset;
use srat_types::*;
use std::collections::BTreeMap;

/// The demo user holding `role`; the coordinator covers FunderA only.
pub fn actor(role: Role) -> User {
    match role {
        Role::Admin => User::new("u1", "admin", "Admin", role),
        Role::Pi => User::new("u2", "pi", "PI", role),
        Role::Facilitator => User::new("u3", "fac", "Facilitator", role),
        Role::Coordinator => {
            User::new("u4", "coord1", "Coord NICU", role).with_fund_sources(["FunderA"])
        }
        Role::FieldStaff => User::new("u5", "field1", "Field Worker A", role),
        Role::Finance => User::new("u6", "finance", "Finance", role),
    }
}

/// A desk over the seeded demo dataset
pub fn demo_desk() -> ReimbursementDesk {
    let mut desk = ReimbursementDesk::new(Dataset::empty());
    desk.seed_if_empty(demo_dataset());
    desk
}

/// Two items totalling 500
pub fn sample_drafts() -> Vec<DraftItem> {
    vec![
        DraftItem::new("Fuel", 200.0).with_field("litres", "40"),
        DraftItem::new("Per diem", 300.0).with_field("days", "3"),
    ]
}

/// A request sitting in `status`, built directly with the given item amounts
pub fn request_with(status: RequestStatus, funder: &str, amounts: &[f64]) -> Request {
    let now = Utc::now();
    let mut history = History::new();
    history.append(HistoryEntry::new("Field Worker A", Role::FieldStaff, "Submitted", now));

    Request {
        id: RequestId::generate(),
        created_at: now,
        created_by: UserId::new("u5"),
        created_by_name: "Field Worker A".into(),
        items: amounts
            .iter()
            .map(|amount| Item {
                id: ItemId::generate(),
                category: "Other".into(),
                amount: *amount,
                fields: BTreeMap::new(),
            })
            .collect(),
        funder: funder.to_string(),
        program: "General".into(),
        notes: String::new(),
        status,
        history,
        attachments: Vec::new(),
        approval_letter: None,
        signatures: BTreeMap::new(),
        reimbursed: 0.0,
        version: 0,
    }
}

/// A well-formed action of the given kind
pub fn action_of(kind: ActionKind) -> Action {
    match kind {
        ActionKind::Forward => Action::Forward,
        ActionKind::CoordinatorApprove => Action::CoordinatorApprove,
        ActionKind::PiApprove => Action::pi_approve("Approved"),
        ActionKind::MarkPaid => Action::mark_paid(500.0),
        ActionKind::Reject => Action::reject("Missing receipts"),
    }
}

pub fn arb_role() -> impl Strategy<Value = Role> {
    proptest::sample::select(Role::ALL.to_vec())
}

pub fn arb_status() -> impl Strategy<Value = RequestStatus> {
    proptest::sample::select(RequestStatus::ALL.to_vec())
}

pub fn arb_kind() -> impl Strategy<Value = ActionKind> {
    proptest::sample::select(ActionKind::ALL.to_vec())
}

pub fn arb_funder() -> impl Strategy<Value = String> {
    prop_oneof![Just("FunderA".to_string()), Just("FunderB".to_string())]
}

/// Any action, including ones with missing or odd payloads
pub fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Forward),
        Just(Action::CoordinatorApprove),
        proptest::option::of("[a-zA-Z ]{0,20}").prop_map(|letter| Action::PiApprove { letter }),
        proptest::option::of(-100.0f64..10_000.0).prop_map(|amount| Action::MarkPaid { amount }),
        proptest::option::of("[a-zA-Z ]{0,20}").prop_map(|reason| Action::Reject { reason }),
    ]
}

/// Item amounts as typed by field staff
pub fn arb_amounts() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0f64..50_000.0, 1..8)
}
