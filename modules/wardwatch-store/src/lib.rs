//! File-backed issue ledger shared by the citizen and moderation views.
//!
//! One JSON blob per well-known key, overwritten in full on every save —
//! the browser-storage model this replaces. Saves publish the changed key
//! on an in-process bus so other live views can reload and re-render.

pub mod store;

pub use store::{IssueStore, StorageKey, StoreError};
