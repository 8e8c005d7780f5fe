//! Transport layer (HTTP/JSON).
//!
//! Request bodies are size-checked and decoded once into a validated
//! `DecisionInput` before they reach the engine; rejections are reported as
//! JSON error bodies with stable client codes.

pub mod codec;
pub mod http;

pub use http::ApiError;
