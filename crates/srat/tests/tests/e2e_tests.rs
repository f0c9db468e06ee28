#[path = "e2e/happy_path.rs"]
mod happy_path;

#[path = "e2e/rejection.rs"]
mod rejection;

#[path = "e2e/persistence.rs"]
mod persistence;
