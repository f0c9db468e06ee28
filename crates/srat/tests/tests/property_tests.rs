#[path = "property/state_machine.rs"]
mod state_machine;

#[path = "property/visibility.rs"]
mod visibility;
