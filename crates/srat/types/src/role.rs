//! Roles: who a user is within the approval chain

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role a user holds. Each role owns at most one forward action per
/// request status; the mapping lives in the engine's permission matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "PI")]
    Pi,
    Facilitator,
    Coordinator,
    #[serde(rename = "Field Staff")]
    FieldStaff,
    Finance,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Pi,
        Role::Facilitator,
        Role::Coordinator,
        Role::FieldStaff,
        Role::Finance,
    ];

    /// Human-readable label, also used as the signature key
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Pi => "PI",
            Role::Facilitator => "Facilitator",
            Role::Coordinator => "Coordinator",
            Role::FieldStaff => "Field Staff",
            Role::Finance => "Finance",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a role name is not recognized
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts labels case-insensitively, with spaces, dashes or
    /// underscores between words ("Field Staff", "field-staff", "field_staff").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "admin" => Ok(Role::Admin),
            "pi" => Ok(Role::Pi),
            "facilitator" => Ok(Role::Facilitator),
            "coordinator" => Ok(Role::Coordinator),
            "fieldstaff" => Ok(Role::FieldStaff),
            "finance" => Ok(Role::Finance),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
