//! Policy layer (frozen decision table + per-environment allow-lists).
//!
//! Both structures are validated once at construction and are read-only
//! afterwards, so they can be shared across any number of callers via `Arc`
//! without synchronization.

pub mod allowlist;
pub mod table;

pub use allowlist::AllowedActionSet;
pub use table::PolicyTable;
