//! Fixtures shared by the engine's unit tests

use chrono::Utc;
use srat_types::*;
use std::collections::BTreeMap;

pub(crate) fn user(role: Role) -> User {
    let slug: String = role
        .label()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    User::new(format!("u-{slug}"), slug, role.label(), role)
}

pub(crate) fn request_in(status: RequestStatus, funder: &str) -> Request {
    let now = Utc::now();
    let mut history = History::new();
    history.append(HistoryEntry::new(
        "Field Worker A",
        Role::FieldStaff,
        "Submitted",
        now,
    ));

    Request {
        id: RequestId::generate(),
        created_at: now,
        created_by: UserId::new("u-fieldstaff"),
        created_by_name: "Field Worker A".into(),
        items: vec![
            Item {
                id: ItemId::generate(),
                category: "Fuel".into(),
                amount: 200.0,
                fields: BTreeMap::from([("litres".to_string(), "30".to_string())]),
            },
            Item {
                id: ItemId::generate(),
                category: "Per diem".into(),
                amount: 300.0,
                fields: BTreeMap::new(),
            },
        ],
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
