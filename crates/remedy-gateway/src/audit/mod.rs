//! Durable decision log (JSON lines).
//!
//! Writing happens on a background task behind a bounded queue; the request
//! path only ever enqueues with `try_send`, so a slow or failing disk can
//! never delay or alter a decision.

pub mod decision_log;

pub use decision_log::DecisionLog;
