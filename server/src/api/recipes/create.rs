use super::candidate_from;
use super::get::RecipeEnvelope;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use recipe_core::{validate, RecipeCandidate};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeCandidate,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeEnvelope),
        (status = 400, description = "Invalid recipe fields", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(ctx): State<AppState>,
    body: Result<Json<RecipeCandidate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = validate(candidate_from(body)?)?;

    let recipe = ctx.store.insert(fields).await?;
    tracing::info!(recipe_id = %recipe.id, "Created recipe");

    Ok((
        StatusCode::CREATED,
        Json(RecipeEnvelope::with_message(
            recipe,
            "Recipe created successfully",
        )),
    ))
}
