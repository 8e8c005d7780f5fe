//! remedy core: the frozen remediation policy table, the scope-filtering
//! decision engine, and the transport-agnostic request contract.
//!
//! This crate carries no transport or runtime dependencies so it can be
//! embedded behind any serving layer. The gateway crate wraps it in HTTP.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Invalid identifiers are rejected as `RemedyError` at the boundary; a valid
//! request always yields a `Decision`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod model;
pub mod policy;
pub mod protocol;

/// Shared result type.
pub use error::{Result, RemedyError};

pub use engine::{Decision, DecisionEngine, SystemStatus};
pub use model::{Action, Environment, EventType};
pub use policy::{AllowedActionSet, PolicyTable};
