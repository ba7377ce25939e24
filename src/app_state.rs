//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::mail::Mailer;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contact relay, built once at startup. `None` skips sending.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Mount the SSE cell streams and let pages subscribe to them. Off
    /// under Lambda, where responses are buffered and cut off by the
    /// gateway timeout.
    pub live_streams: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mailer: None,
            live_streams: true,
        }
    }
}

impl AppState {
    /// State with the given relay.
    #[must_use]
    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            mailer: Some(mailer),
            ..Self::default()
        }
    }
}
