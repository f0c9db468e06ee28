//! Demo accounts and templates installed into a fresh dataset.

use srat_types::{Dataset, FieldDescriptor, FieldType, Role, TemplateCatalog, User, UserAccount};

/// The demo dataset: one account per role and the stock category templates.
pub fn demo_dataset() -> Dataset {
    Dataset {
        seeded: true,
        users: demo_accounts(),
        templates: demo_templates(),
        requests: Vec::new(),
    }
}

pub fn demo_accounts() -> Vec<UserAccount> {
    vec![
        UserAccount::new(User::new("u1", "admin", "Admin", Role::Admin), "admin123"),
        UserAccount::new(User::new("u2", "pi", "PI", Role::Pi), "pi123"),
        UserAccount::new(
            User::new("u3", "fac", "Facilitator", Role::Facilitator),
            "fac123",
        ),
        UserAccount::new(
            User::new("u4", "coord1", "Coord NICU", Role::Coordinator)
                .with_fund_sources(["FunderA"]),
            "coord123",
        ),
        UserAccount::new(
            User::new("u5", "field1", "Field Worker A", Role::FieldStaff),
            "field123",
        ),
        UserAccount::new(User::new("u6", "finance", "Finance", Role::Finance), "finance123"),
    ]
}

pub fn demo_templates() -> TemplateCatalog {
    let stock = [
        (
            "Fuel",
            vec![
                FieldDescriptor::text("vehicle_no", "Vehicle no"),
                FieldDescriptor::number("litres", "Litres"),
            ],
        ),
        (
            "Per diem",
            vec![
                FieldDescriptor::text("traveller", "Traveller"),
                FieldDescriptor::number("days", "Days"),
            ],
        ),
        (
            "Air ticket",
            vec![FieldDescriptor::text("passenger", "Passenger")],
        ),
        (
            "Other",
            vec![FieldDescriptor::new("details", "Details", FieldType::Textarea)],
        ),
    ];

    stock.into_iter().collect()
}
