use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointMap {
    pub recipes: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointMap,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "API name and endpoint map", body = WelcomeResponse)
    )
)]
pub async fn welcome() -> impl IntoResponse {
    Json(WelcomeResponse {
        message: "Welcome to Recipe CRUD API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointMap {
            recipes: "/api/recipes".to_string(),
        },
    })
}
