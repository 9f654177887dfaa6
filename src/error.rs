//! Invocation errors
//!
//! The function itself cannot fail. Everything here is raised by the host around it and
//! maps onto the HTTP status a platform gateway would answer with.

use std::time::Duration;

use hyper::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("function timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("request body too large: {size} bytes (max: {max})")]
    BodyTooLarge { size: u64, max: u64 },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("function crashed: {0}")]
    Crashed(String),

    #[error("malformed function response: {0}")]
    MalformedResponse(String),

    #[error("invalid event: {0}")]
    Event(#[from] serde_json::Error),
}

impl InvokeError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead(_) | Self::Event(_) => StatusCode::BAD_REQUEST,
            Self::Crashed(_) | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
