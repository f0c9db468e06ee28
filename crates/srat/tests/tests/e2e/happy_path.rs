//! End-to-end test: a request travels the whole approval chain.
//!
//! Field Staff submits, Facilitator forwards, the FunderA coordinator
//! approves, the PI approves with a letter, Finance pays 500.

use srat_engine::Action;
use srat_tests::*;
use srat_types::*;

#[test]
fn full_chain_ends_paid_with_five_entries() {
    let mut desk = demo_desk();
    let request = desk
        .submit(
            &actor(Role::FieldStaff),
            sample_drafts(),
            RequestMeta::new("FunderA", "Community outreach"),
        )
        .unwrap();
    assert_eq!(request.status, RequestStatus::PendingFacilitator);
    assert_eq!(request.total(), 500.0);

    let r = desk
        .act(&request.id, Some(0), &actor(Role::Facilitator), Action::Forward)
        .unwrap();
    assert_eq!(r.status, RequestStatus::PendingCoordinator);

    let r = desk
        .act(&r.id, Some(r.version), &actor(Role::Coordinator), Action::CoordinatorApprove)
        .unwrap();
    assert_eq!(r.status, RequestStatus::PendingPi);

    let r = desk
        .act(
            &r.id,
            Some(r.version),
            &actor(Role::Pi),
            Action::pi_approve("Approved, see attached"),
        )
        .unwrap();
    assert_eq!(r.status, RequestStatus::ApprovedForFinance);
    assert_eq!(r.approval_letter.as_deref(), Some("Approved, see attached"));

    let r = desk
        .act(&r.id, Some(r.version), &actor(Role::Finance), Action::mark_paid(500.0))
        .unwrap();
    assert_eq!(r.status, RequestStatus::Paid);
    assert_eq!(r.reimbursed, 500.0);
    assert_eq!(r.version, 4);

    assert_eq!(
        r.history.actions(),
        vec![
            "Submitted",
            "Forwarded",
            "Coordinator approved",
            "PI approved",
            "Finance paid 500",
        ]
    );
    let roles: Vec<Role> = r.history.iter().map(|e| e.role).collect();
    assert_eq!(
        roles,
        vec![Role::FieldStaff, Role::Facilitator, Role::Coordinator, Role::Pi, Role::Finance]
    );

    assert_eq!(desk.dataset().request(&r.id), Some(&r));
}

#[test]
fn fund_source_scoping() {
    let mut desk = demo_desk();
    let staff = actor(Role::FieldStaff);
    let coord = actor(Role::Coordinator);

    let a = desk
        .submit(&staff, sample_drafts(), RequestMeta::new("FunderA", "General"))
        .unwrap();
    let b = desk
        .submit(&staff, sample_drafts(), RequestMeta::new("FunderB", "General"))
        .unwrap();
    for id in [&a.id, &b.id] {
        desk.act(id, None, &actor(Role::Facilitator), Action::Forward)
            .unwrap();
    }

    assert_eq!(
        desk.act(&b.id, None, &coord, Action::CoordinatorApprove)
            .unwrap_err(),
        WorkflowError::NotPermitted
    );
    let approved = desk
        .act(&a.id, None, &coord, Action::CoordinatorApprove)
        .unwrap();
    assert_eq!(approved.status, RequestStatus::PendingPi);

    let seen: Vec<_> = desk
        .visible_requests(&coord, &Default::default())
        .into_iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(seen, vec![a.id.clone()]);
}

#[test]
fn admin_can_stand_in_for_pi() {
    let mut desk = demo_desk();
    let request = desk
        .submit(&actor(Role::FieldStaff), sample_drafts(), RequestMeta::new("FunderA", "General"))
        .unwrap();
    desk.act(&request.id, None, &actor(Role::Facilitator), Action::Forward)
        .unwrap();
    desk.act(&request.id, None, &actor(Role::Coordinator), Action::CoordinatorApprove)
        .unwrap();

    let approved = desk
        .act(
            &request.id,
            None,
            &actor(Role::Admin),
            Action::PiApprove { letter: None },
        )
        .unwrap();
    assert_eq!(approved.status, RequestStatus::ApprovedForFinance);
    let letter = approved.approval_letter.unwrap();
    assert!(letter.contains("APPROVAL LETTER"));
    assert!(letter.contains("Admin"));
}
