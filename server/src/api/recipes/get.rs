use super::find_existing;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use recipe_core::{Category, Difficulty, Recipe, RecipeId};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub prep_time: i64,
    pub cook_time: i64,
    /// prepTime + cookTime, derived from the stored values on every render
    pub total_time: i64,
    pub servings: i64,
    pub category: Category,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let total_time = recipe.total_time();
        let fields = recipe.fields;

        RecipeResponse {
            id: recipe.id,
            name: fields.name,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            prep_time: fields.prep_time,
            cook_time: fields.cook_time,
            total_time,
            servings: fields.servings,
            category: fields.category,
            difficulty: fields.difficulty,
            image_url: fields.image_url,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Success envelope around a single recipe
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: RecipeResponse,
}

impl RecipeEnvelope {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            success: true,
            message: None,
            data: recipe.into(),
        }
    }

    pub fn with_message(recipe: Recipe, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::new(recipe)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeEnvelope),
        (status = 400, description = "Malformed recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeEnvelope>, ApiError> {
    let recipe = find_existing(&ctx, &id).await?;

    Ok(Json(RecipeEnvelope::new(recipe)))
}
