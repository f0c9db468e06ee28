//! Error types for the reimbursement workflow

use crate::RequestId;

/// Input was malformed or incomplete. Nothing was changed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("a request needs at least one item")]
    EmptyItems,

    #[error("amount must be a non-negative number, got {0}")]
    NegativeAmount(f64),

    #[error("a paid amount is required")]
    MissingPaidAmount,

    #[error("a rejection reason is required")]
    MissingReason,

    #[error("unknown funder: {0}")]
    UnknownFunder(String),

    #[error("field '{key}' of category '{category}' expects a {expected} value, got '{value}'")]
    InvalidFieldValue {
        category: String,
        key: String,
        expected: String,
        value: String,
    },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("provide at least one ID (national, driver, or passport)")]
    MissingIdentityDocument,

    #[error("template field key must not be empty")]
    EmptyFieldKey,

    #[error("template field key appears more than once: {0}")]
    DuplicateFieldKey(String),
}

/// Errors returned by workflow operations.
///
/// `NotPermitted` carries no detail: callers cannot tell a
/// role mismatch from a wrong state or an out-of-scope funder.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("action not permitted")]
    NotPermitted,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("request not found: {0}")]
    RequestNotFound(RequestId),

    #[error("request {id} changed concurrently: expected version {expected}, found {found}")]
    VersionConflict {
        id: RequestId,
        expected: u64,
        found: u64,
    },
}

impl WorkflowError {
    pub fn is_not_permitted(&self) -> bool {
        matches!(self, WorkflowError::NotPermitted)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_permitted_message_is_opaque() {
        assert_eq!(WorkflowError::NotPermitted.to_string(), "action not permitted");
    }

    #[test]
    fn validation_converts_into_workflow_error() {
        let err: WorkflowError = ValidationError::MissingReason.into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("rejection reason"));
    }

    #[test]
    fn field_value_error_names_the_field() {
        let err = ValidationError::InvalidFieldValue {
            category: "Fuel".into(),
            key: "litres".into(),
            expected: "number".into(),
            value: "lots".into(),
        };
        let s = err.to_string();
        assert!(s.contains("litres"));
        assert!(s.contains("number"));
    }
}
