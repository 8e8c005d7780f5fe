//! Lightweight in-process metrics.
//!
//! Counters and histograms are atomics keyed by sorted label sets in a
//! `DashMap`, rendered in Prometheus text format by the `/metrics` handler.

pub mod metrics;

pub use metrics::RemedyMetrics;
