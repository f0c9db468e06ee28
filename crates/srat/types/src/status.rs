//! Request status: the states of the approval chain

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a request currently sits in the approval chain.
///
/// `Paid` and `Rejected` are absorbing: no transition leaves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Pending Facilitator")]
    PendingFacilitator,
    #[serde(rename = "Pending Coordinator")]
    PendingCoordinator,
    #[serde(rename = "Pending PI")]
    PendingPi,
    #[serde(rename = "Approved for Finance")]
    ApprovedForFinance,
    Paid,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::PendingFacilitator,
        RequestStatus::PendingCoordinator,
        RequestStatus::PendingPi,
        RequestStatus::ApprovedForFinance,
        RequestStatus::Paid,
        RequestStatus::Rejected,
    ];

    /// Whether this is a final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Paid | RequestStatus::Rejected)
    }

    /// Position along the approval chain. Rejected ranks after every
    /// pending state so that no transition ever lowers the rank.
    pub fn rank(&self) -> u8 {
        match self {
            RequestStatus::PendingFacilitator => 0,
            RequestStatus::PendingCoordinator => 1,
            RequestStatus::PendingPi => 2,
            RequestStatus::ApprovedForFinance => 3,
            RequestStatus::Paid | RequestStatus::Rejected => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::PendingFacilitator => "Pending Facilitator",
            RequestStatus::PendingCoordinator => "Pending Coordinator",
            RequestStatus::PendingPi => "Pending PI",
            RequestStatus::ApprovedForFinance => "Approved for Finance",
            RequestStatus::Paid => "Paid",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a status name is not recognized
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        RequestStatus::ALL
            .into_iter()
            .find(|status| {
                let label: String = status
                    .label()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .collect();
                label == normalized
            })
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
