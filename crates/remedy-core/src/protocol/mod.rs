//! Transport-agnostic request contract.
//!
//! Wire requests carry environment and event identifiers as plain strings.
//! They are validated here into closed enum tags before anything reaches the
//! engine; unknown identifiers surface as `RemedyError`, never as a panic.

pub mod request;

pub use request::{DecisionInput, DecisionRequest};
