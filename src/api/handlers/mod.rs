//! Endpoint handlers organized by concern.

pub mod contact;
pub mod pages;
pub mod seo;
pub mod stream;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes every route except the cell streams, which
/// [`crate::api::build_router`] mounts only when live streams are on.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pages::routes())
        .merge(contact::routes())
        .merge(seo::routes())
        .merge(system::routes())
}
