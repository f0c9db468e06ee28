//! Reimbursement Domain Types for SRAT
//!
//! Field staff submit itemized reimbursement requests which then travel
//! through a fixed approval chain before payment:
//!
//! ```text
//! Field Staff ─submit─▶ Facilitator ─▶ Coordinator ─▶ PI ─▶ Finance ─▶ Paid
//!                            │              │          │        │
//!                            └──────────────┴──reject──┴────────┴──▶ Rejected
//! ```
//!
//! # Key Concepts
//!
//! - **Request**: a submitted bundle of [`Item`]s billed against one funder.
//!   Its [`RequestStatus`] only moves forward, and every move leaves a
//!   [`HistoryEntry`] in the append-only [`History`].
//! - **User**: an authenticated identity with exactly one [`Role`]. Coordinators
//!   additionally carry the set of funders they may act on.
//! - **TemplateCatalog**: per-category field descriptors used to shape item
//!   details at entry time.
//! - **Dataset**: the whole-snapshot unit exchanged with persistent storage.
//!
//! This crate holds data and local invariants only. Status transitions are
//! decided by `srat-engine`.

#![deny(unsafe_code)]

mod attachment;
mod dataset;
mod errors;
mod history;
mod ids;
mod item;
mod request;
mod role;
mod status;
mod template;
mod user;

pub use attachment::*;
pub use dataset::*;
pub use errors::*;
pub use history::*;
pub use ids::*;
pub use item::*;
pub use request::*;
pub use role::*;
pub use status::*;
pub use template::*;
pub use user::*;
