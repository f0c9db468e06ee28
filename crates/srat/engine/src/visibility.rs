//! Visibility filter: which requests a user may see
//!
//! Pure and recomputed on every read. Input order is preserved.

use serde::{Deserialize, Serialize};
use srat_types::{Request, RequestStatus, Role, User};

/// Whether `actor` may see `request`
pub fn can_see(actor: &User, request: &Request) -> bool {
    match actor.role {
        Role::Admin | Role::Pi | Role::Finance | Role::Facilitator => true,
        Role::Coordinator => actor.covers_funder(&request.funder),
        Role::FieldStaff => request.created_by == actor.id,
    }
}

/// The subsequence of `requests` visible to `actor`, in input order
pub fn visible<'a>(requests: &'a [Request], actor: &User) -> Vec<&'a Request> {
    requests.iter().filter(|r| can_see(actor, r)).collect()
}

/// Dashboard narrowing applied on top of visibility.
///
/// Unset criteria match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    pub funder: Option<String>,
    pub status: Option<RequestStatus>,
    /// Case-insensitive substring of the program name
    pub program: Option<String>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funder(mut self, funder: impl Into<String>) -> Self {
        self.funder = Some(funder.into());
        self
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn matches(&self, request: &Request) -> bool {
        if let Some(funder) = &self.funder {
            if &request.funder != funder {
                return false;
            }
        }
        if let Some(status) = self.status {
            if request.status != status {
                return false;
            }
        }
        if let Some(program) = &self.program {
            let needle = program.trim().to_lowercase();
            if !needle.is_empty() && !request.program.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Narrow an already visible list, keeping its order
    pub fn apply<'a>(&self, requests: Vec<&'a Request>) -> Vec<&'a Request> {
        requests.into_iter().filter(|r| self.matches(r)).collect()
    }
}
