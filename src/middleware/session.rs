//! Per-request session identifier.
//!
//! The browser echoes the id it was given in the `X-Session-ID` header on
//! htmx requests. First page loads get a fresh random id. The id travels
//! down the handler chain as a request extension, never as global state.

use std::fmt;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;

/// Header carrying the session id in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_LEN: usize = 64;

/// Short opaque visitor session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new id from 3 random bytes (6 lower-case hex chars).
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 3] = rand::thread_rng().r#gen();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Accepts a client-supplied id of 1–64 ASCII alphanumerics, `-` or `_`.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        let valid = !value.is_empty()
            && value.len() <= MAX_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(value.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the [`SessionId`] for a request and stores it as an extension.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(SessionId::from_header)
        .unwrap_or_else(SessionId::generate);
    request.extensions_mut().insert(session);
    next.run(request).await
}
