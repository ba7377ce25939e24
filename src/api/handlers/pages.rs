//! Page handlers and the HTML response type shared by all of them.

use std::convert::Infallible;

use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::app_state::AppState;
use crate::middleware::{SESSION_HEADER, SessionId};
use crate::views;

/// Per-request rendering context, passed explicitly to every view.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Visitor session resolved by the session middleware.
    pub session: SessionId,
    /// `true` when the request came from htmx (`HX-Request` present).
    pub htmx: bool,
    /// Pages subscribe their grids to the cell streams.
    pub live: bool,
}

impl PageContext {
    /// Wraps rendered markup into a response for this request.
    #[must_use]
    pub fn page(&self, status: StatusCode, html: String) -> HtmlPage {
        HtmlPage {
            status,
            html,
            session: (!self.htmx).then(|| self.session.clone()),
        }
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionId>()
            .cloned()
            .unwrap_or_else(SessionId::generate);
        let htmx = parts.headers.contains_key("hx-request");
        Ok(Self {
            session,
            htmx,
            live: state.live_streams,
        })
    }
}

/// An HTML document or partial.
///
/// Always `text/html; charset=utf-8` and `no-cache`. Full page loads also
/// echo the session id so the browser can send it back on htmx requests.
#[derive(Debug)]
pub struct HtmlPage {
    status: StatusCode,
    html: String,
    session: Option<SessionId>,
}

impl IntoResponse for HtmlPage {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.html).into_response();
        let headers = response.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        if let Some(session) = self.session
            && let Ok(value) = HeaderValue::from_str(session.as_str())
        {
            headers.insert(SESSION_HEADER, value);
        }
        response
    }
}

/// `GET /` — Landing page.
pub async fn home(ctx: PageContext) -> HtmlPage {
    ctx.page(StatusCode::OK, views::home(&ctx.session, ctx.live))
}

/// `GET /privacy` — Privacy policy.
pub async fn privacy(ctx: PageContext) -> HtmlPage {
    ctx.page(StatusCode::OK, views::privacy(&ctx.session))
}

/// Fallback for unmatched routes: the 404 page with a 404 status.
pub async fn not_found(ctx: PageContext) -> HtmlPage {
    ctx.page(StatusCode::NOT_FOUND, views::not_found(&ctx.session, ctx.live))
}

/// Page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/privacy", get(privacy))
}
