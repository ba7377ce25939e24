//! Site error types with HTTP status code mapping.
//!
//! [`SiteError`] is the error returned by request handlers. Each variant
//! maps to a specific HTTP status code and a structured JSON error body.
//! [`MailError`] and [`StreamError`] cover the two collaborators that can
//! fail outside a request/response cycle.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid form: Failed to parse form"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Handler-level error enum with HTTP status code mapping.
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Request body could not be decoded as a form.
    #[error("invalid form: {0}")]
    InvalidForm(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SiteError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidForm(_) => 1001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Failure while relaying a contact message.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The outgoing request could not be assembled.
    #[error("could not build email: {0}")]
    Build(#[from] aws_sdk_ses::error::BuildError),

    /// The provider returned an error or was unreachable.
    #[error("send failed: {0}")]
    Send(String),
}

/// Failure while writing to an open cell stream.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
    /// The receiving side of the stream is gone.
    #[error("stream receiver disconnected")]
    Disconnected,
}
