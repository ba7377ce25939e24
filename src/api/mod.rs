//! HTTP surface: route table, layering and OpenAPI document.

pub mod docs;
pub mod handlers;

use std::path::Path;

use axum::Router;
use axum::middleware::from_fn;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::middleware::headers::{with_immutable_cache, with_security_headers};
use crate::middleware::{session_middleware, visitor_log_middleware};

/// Builds the route table without middleware or state.
///
/// The `/stream/*` endpoints are only mounted when `live_streams` is set.
pub fn build_router(live_streams: bool) -> Router<AppState> {
    let router = handlers::routes().merge(docs::routes());
    let router = if live_streams {
        router.merge(handlers::stream::routes())
    } else {
        router
    };
    router.fallback(handlers::pages::not_found)
}

/// Serves `css/`, `img/` and `js/` under `public_dir` with a one-year cache.
pub fn asset_routes(public_dir: &Path) -> Router<AppState> {
    let assets = Router::new()
        .nest_service("/css", ServeDir::new(public_dir.join("css")))
        .nest_service("/img", ServeDir::new(public_dir.join("img")))
        .nest_service("/js", ServeDir::new(public_dir.join("js")));
    with_immutable_cache(assets)
}

/// Builds the complete application: routes, assets and the request pipeline.
///
/// Layer order, outermost first: trace, security headers, session, visitor
/// logging, compression.
pub fn build_app(state: AppState, public_dir: &Path) -> Router {
    let router = build_router(state.live_streams)
        .merge(asset_routes(public_dir))
        .layer(CompressionLayer::new())
        .layer(from_fn(visitor_log_middleware))
        .layer(from_fn(session_middleware));

    with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
