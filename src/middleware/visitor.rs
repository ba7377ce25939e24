//! Visitor traffic logging with crude bot filtering.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::middleware::Next;
use axum::response::Response;

use super::SessionId;

const BOT_MARKERS: [&str; 3] = ["bot", "validation", "spider"];

/// Returns `true` for user agents that look like crawlers or uptime checks.
#[must_use]
pub fn is_bot(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    BOT_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Logs one `human_traffic` event per non-bot request once the response
/// is ready.
///
/// Must run inside [`super::session_middleware`] so the [`SessionId`]
/// extension is present.
pub async fn visitor_log_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let headers = request.headers();
    let bot = is_bot(header_str(headers, USER_AGENT.as_str()).unwrap_or_default());
    let trigger = header_str(headers, "hx-trigger")
        .unwrap_or("page_load")
        .to_string();
    let url_context = header_str(headers, "hx-current-url")
        .unwrap_or_default()
        .to_string();
    let session = request
        .extensions()
        .get::<SessionId>()
        .map(ToString::to_string)
        .unwrap_or_default();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if !bot {
        tracing::info!(
            session = %session,
            method = %method,
            path = %path,
            trigger = %trigger,
            url_context = %url_context,
            status = response.status().as_u16(),
            dur_ms = duration_ms(start.elapsed()),
            "human_traffic"
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crawlers_are_bots() {
        assert!(is_bot("Mozilla/5.0 (compatible; Googlebot/2.1)"));
        assert!(is_bot("Baiduspider"));
        assert!(is_bot("W3C_Validation_Service"));
    }

    #[test]
    fn durations_convert_without_wrapping() {
        assert_eq!(duration_ms(Duration::from_micros(1_500)), 1);
        assert_eq!(duration_ms(Duration::from_secs(30)), 30_000);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn browsers_are_humans() {
        assert!(!is_bot(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
        assert!(!is_bot(""));
    }
}
