//! CLI error types

use srat_storage::{AuthError, StorageError};
use srat_types::WorkflowError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credentials supplied
    #[error("Not logged in: pass --user and --password (or set SRAT_USER / SRAT_PASSWORD)")]
    NotLoggedIn,

    /// Credentials rejected
    #[error("Login failed: {0}")]
    Auth(#[from] AuthError),

    /// Workflow or validation failure
    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Anything else, with context attached at the call site
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
