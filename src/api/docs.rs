//! OpenAPI document for the JSON and form endpoints.

use axum::Router;
use utoipa::OpenApi;

use super::handlers::contact::ContactForm;
use super::handlers::system::HealthResponse;
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// Where the OpenAPI JSON is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the site's API endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "StackFoundry site API"),
    paths(
        crate::api::handlers::contact::submit_contact,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(ContactForm, HealthResponse, ErrorResponse, ErrorBody)),
    tags(
        (name = "Contact", description = "Contact form relay"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Documentation routes: Swagger UI plus the JSON it loads.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Documentation routes: the OpenAPI JSON only.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::get;

    use crate::error::SiteError;

    async fn openapi_json() -> Result<impl axum::response::IntoResponse, SiteError> {
        let json = ApiDoc::openapi()
            .to_pretty_json()
            .map_err(|err| SiteError::Internal(err.to_string()))?;
        Ok(([(CONTENT_TYPE, "application/json")], json))
    }

    Router::new().route(OPENAPI_PATH, get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_api_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/contact"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
