use super::get::RecipeResponse;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use recipe_core::RecipeFilter;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Exact category, case-insensitive (e.g. "dessert", "Main Course")
    pub category: Option<String>,
    /// Exact difficulty, case-insensitive
    pub difficulty: Option<String>,
    /// Case-insensitive substring of the recipe name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub success: bool,
    /// Number of recipes in `data`
    pub count: usize,
    /// Matching recipes, newest first
    pub data: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Matching recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid query string", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(ctx): State<AppState>,
    params: Result<Query<ListRecipesParams>, QueryRejection>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let Query(params) = params?;

    let filter = RecipeFilter::from_params(
        params.category.as_deref(),
        params.difficulty.as_deref(),
        params.search.as_deref(),
    );

    let recipes = ctx.store.find(&filter).await?;
    tracing::debug!(count = recipes.len(), ?filter, "Listed recipes");

    Ok(Json(ListRecipesResponse {
        success: true,
        count: recipes.len(),
        data: recipes.into_iter().map(RecipeResponse::from).collect(),
    }))
}
