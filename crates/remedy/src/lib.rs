//! Top-level facade crate for remedy.
//!
//! Re-exports the policy core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use remedy_core::*;
}

pub mod gateway {
    pub use remedy_gateway::*;
}
