//! Presentation layer for the live demo UI.
//!
//! Everything here is derived from `Decision` / `SystemStatus` values or is
//! static data; none of it feeds back into the engine.

pub mod scenarios;
pub mod validate;
pub mod view;

pub use scenarios::{catalog, Scenario};
pub use validate::{run_validation, ValidationReport};
pub use view::DemoDecisionView;
