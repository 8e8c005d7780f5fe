//! Shared error type across remedy crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Environment tag outside {dev, stage, prod}.
    UnknownEnvironment,
    /// Event tag outside {crash, overload, false_failure}.
    UnknownEventType,
    /// Payload too large.
    PayloadTooLarge,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnknownEnvironment => "UNKNOWN_ENVIRONMENT",
            ClientCode::UnknownEventType => "UNKNOWN_EVENT_TYPE",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// Whether the caller is at fault (request rejected at the boundary).
    pub fn is_input_error(self) -> bool {
        matches!(
            self,
            ClientCode::BadRequest
                | ClientCode::UnknownEnvironment
                | ClientCode::UnknownEventType
                | ClientCode::PayloadTooLarge
        )
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RemedyError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum RemedyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
    #[error("payload too large: body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("incomplete policy table: {0}")]
    IncompleteTable(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RemedyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RemedyError::BadRequest(_) => ClientCode::BadRequest,
            RemedyError::UnknownEnvironment(_) => ClientCode::UnknownEnvironment,
            RemedyError::UnknownEventType(_) => ClientCode::UnknownEventType,
            RemedyError::PayloadTooLarge(_) => ClientCode::PayloadTooLarge,
            RemedyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            RemedyError::IncompleteTable(_) | RemedyError::Internal(_) => ClientCode::Internal,
        }
    }
}
