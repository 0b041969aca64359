//! In-memory person registry.
//!
//! The registry is a concurrent map from name to [`Person`](crate::models::Person).
//! Every operation is atomic for a single person; there are no cross-person
//! transactions, so a snapshot taken while other callers write may mix old
//! and new entries.

mod store;

pub use store::{normalize_name, ModifyReport, Registry, UpsertKind, UpsertOutcome};
