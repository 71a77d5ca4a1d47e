pub mod welcome;

use crate::AppState;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for top-level endpoints outside /api/recipes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(welcome::welcome))
}

/// Body for requests that match no route. Carries the text under both keys
/// so clients reading either `message` or `error` see it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteNotFoundResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            success: false,
            message: "Route not found".to_string(),
            error: "Route not found".to_string(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(welcome::welcome),
    components(schemas(
        welcome::WelcomeResponse,
        welcome::EndpointMap,
        RouteNotFoundResponse,
    ))
)]
pub struct ApiDoc;
