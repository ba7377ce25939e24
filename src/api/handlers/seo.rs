//! Crawler-facing text files, embedded at compile time.

use axum::Router;
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use axum::response::IntoResponse;
use axum::routing::get;

use crate::app_state::AppState;

const SEO_CACHE: &str = "public, max-age=86400";

const SITEMAP: &str = include_str!("../../../public/sitemap.xml");
const ROBOTS: &str = include_str!("../../../public/robots.txt");
const LLMS: &str = include_str!("../../../public/llms.txt");

fn seo_file(content_type: &'static str, body: &'static str) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, content_type), (CACHE_CONTROL, SEO_CACHE)],
        body,
    )
}

/// `GET /sitemap.xml`
pub async fn sitemap() -> impl IntoResponse {
    seo_file("application/xml", SITEMAP)
}

/// `GET /robots.txt`
pub async fn robots() -> impl IntoResponse {
    seo_file("text/plain", ROBOTS)
}

/// `GET /llms.txt` — Site summary for language-model crawlers.
pub async fn llms() -> impl IntoResponse {
    seo_file("text/plain; charset=utf-8", LLMS)
}

/// `GET /llm.txt` — Permanent redirect to the canonical `/llms.txt`.
pub async fn llm_redirect() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, "/llms.txt")])
}

/// SEO routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .route("/llms.txt", get(llms))
        .route("/llm.txt", get(llm_redirect))
}
