//! Decode-once codec for decision request bodies.
//!
//! Cheap checks first (empty / oversized body), then JSON parsing and enum
//! validation via `remedy_core::protocol`.

use bytes::Bytes;
use remedy_core::{
    error::{Result, RemedyError},
    protocol::{DecisionInput, DecisionRequest},
};

pub fn decode(body: &Bytes, max_body_bytes: usize) -> Result<DecisionInput> {
    if body.len() > max_body_bytes {
        return Err(RemedyError::PayloadTooLarge(max_body_bytes));
    }
    if body.is_empty() {
        return Err(RemedyError::BadRequest("request body is empty".into()));
    }
    DecisionRequest::decode(body)
}
