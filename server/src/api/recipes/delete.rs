use super::find_existing;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Serializes as `{}`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub message: String,
    pub data: EmptyObject,
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = DeleteRecipeResponse),
        (status = 400, description = "Malformed recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteRecipeResponse>, ApiError> {
    let existing = find_existing(&ctx, &id).await?;

    if !ctx.store.delete_by_id(existing.id).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(recipe_id = %existing.id, "Deleted recipe");

    Ok(Json(DeleteRecipeResponse {
        success: true,
        message: "Recipe deleted successfully".to_string(),
        data: EmptyObject {},
    }))
}
