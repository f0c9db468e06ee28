//! CLI command implementations

pub mod requests;
pub mod templates;
pub mod users;
