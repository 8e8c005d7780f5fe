//! remedy gateway library entry.
//!
//! Wires config, the shared decision engine, HTTP transport, the demo
//! presentation layer, metrics, and the decision log into one axum service.
//! Consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod audit;
pub mod config;
pub mod demo;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
