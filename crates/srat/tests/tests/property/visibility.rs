//! Property tests: visibility is an order-preserving, role-scoped subsequence.

use proptest::prelude::*;
use srat_engine::{can_see, visible, RequestFilter};
use srat_tests::*;
use srat_types::*;

fn arb_collection() -> impl Strategy<Value = Vec<Request>> {
    proptest::collection::vec((arb_status(), arb_funder(), any::<bool>()), 0..20).prop_map(
        |specs| {
            specs
                .into_iter()
                .map(|(status, funder, own)| {
                    let mut r = request_with(status, &funder, &[10.0]);
                    if !own {
                        r.created_by = UserId::new("someone-else");
                    }
                    r
                })
                .collect()
        },
    )
}

/// Who sees what, spelled out per demo actor from the request's own fields
fn expected_visible(role: Role, request: &Request) -> bool {
    match role {
        Role::Admin | Role::Pi | Role::Finance | Role::Facilitator => true,
        Role::Coordinator => request.funder == "FunderA",
        Role::FieldStaff => request.created_by.as_str() == "u5",
    }
}

proptest! {
    /// The visible list keeps input order and contains exactly the visible requests.
    #[test]
    fn visible_is_ordered_subsequence(requests in arb_collection(), role in arb_role()) {
        let user = actor(role);
        let seen = visible(&requests, &user);

        let expected: Vec<&RequestId> = requests
            .iter()
            .filter(|r| expected_visible(role, r))
            .map(|r| &r.id)
            .collect();
        let got: Vec<&RequestId> = seen.iter().map(|r| &r.id).collect();
        prop_assert_eq!(got, expected);
        for r in &requests {
            prop_assert_eq!(can_see(&user, r), expected_visible(role, r));
        }
    }

    /// A FunderA coordinator sees every FunderA request and nothing else;
    /// field staff see all of their own and nothing else.
    #[test]
    fn scoped_roles_see_exactly_their_slice(requests in arb_collection()) {
        let funder_a = requests.iter().filter(|r| r.funder == "FunderA").count();
        let coordinator_sees = visible(&requests, &actor(Role::Coordinator));
        prop_assert_eq!(coordinator_sees.len(), funder_a);
        for r in coordinator_sees {
            prop_assert_eq!(r.funder.as_str(), "FunderA");
        }

        let staff = actor(Role::FieldStaff);
        let own = requests.iter().filter(|r| r.created_by == staff.id).count();
        let staff_sees = visible(&requests, &staff);
        prop_assert_eq!(staff_sees.len(), own);
        for r in staff_sees {
            prop_assert_eq!(&r.created_by, &staff.id);
        }

        prop_assert_eq!(visible(&requests, &actor(Role::Finance)).len(), requests.len());
    }

    /// Filtering only ever narrows.
    #[test]
    fn filters_narrow(requests in arb_collection(), status in arb_status(), funder in arb_funder()) {
        let seen = visible(&requests, &actor(Role::Admin));
        let narrowed = RequestFilter::new()
            .with_status(status)
            .with_funder(funder.clone())
            .apply(seen.clone());

        prop_assert!(narrowed.len() <= seen.len());
        for r in narrowed {
            prop_assert_eq!(r.status, status);
            prop_assert_eq!(&r.funder, &funder);
        }
    }
}
