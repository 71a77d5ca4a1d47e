use super::{candidate_from, find_existing};
use super::get::RecipeEnvelope;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use recipe_core::{validate, RecipeCandidate};

/// Replace every writable field of a recipe.
///
/// This is not a patch: fields missing from the body fall back to their
/// defaults exactly as on create.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipeCandidate,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeEnvelope),
        (status = 400, description = "Malformed ID or invalid recipe fields", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RecipeCandidate>, JsonRejection>,
) -> Result<Json<RecipeEnvelope>, ApiError> {
    let existing = find_existing(&ctx, &id).await?;

    let fields = validate(candidate_from(body)?)?;

    // Removed between the existence check and the write
    let recipe = ctx
        .store
        .update_by_id(existing.id, fields)
        .await?
        .ok_or_else(|| ApiError::NotFound(id.clone()))?;
    tracing::info!(recipe_id = %recipe.id, "Updated recipe");

    Ok(Json(RecipeEnvelope::with_message(
        recipe,
        "Recipe updated successfully",
    )))
}
