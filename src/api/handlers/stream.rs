//! SSE endpoints animating the hex grids.

use axum::Router;
use axum::response::sse::Sse;
use axum::routing::get;

use super::pages::PageContext;
use crate::app_state::AppState;
use crate::stream::sse::CellEventStream;
use crate::stream::{HERO_GRID, MATRIX_RAIN, WIDE_GRID, open_cell_stream};

/// `GET /stream/hex` — Home page hero grid.
pub async fn hero_stream(ctx: PageContext) -> Sse<CellEventStream> {
    open_cell_stream(HERO_GRID, ctx.session)
}

/// `GET /stream/hex-wide` — Home page backdrop grid.
pub async fn wide_stream(ctx: PageContext) -> Sse<CellEventStream> {
    open_cell_stream(WIDE_GRID, ctx.session)
}

/// `GET /stream/matrix` — 404 page rain.
pub async fn matrix_stream(ctx: PageContext) -> Sse<CellEventStream> {
    open_cell_stream(MATRIX_RAIN, ctx.session)
}

/// Stream routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(HERO_GRID.path, get(hero_stream))
        .route(WIDE_GRID.path, get(wide_stream))
        .route(MATRIX_RAIN.path, get(matrix_stream))
}
