pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::error::ApiError;
use crate::{AppContext, AppState};
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use axum::{Json, Router};
use recipe_core::{Recipe, RecipeCandidate, RecipeId};
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// Parse a path id and load the recipe it names.
///
/// Fails with `MalformedId` before touching the store, and with `NotFound`
/// (echoing the id as supplied) when nothing is stored under it.
async fn find_existing(ctx: &AppContext, raw_id: &str) -> Result<Recipe, ApiError> {
    let id: RecipeId = raw_id.parse()?;

    ctx.store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(raw_id.to_string()))
}

/// Unwrap a recipe body. A body sent without a JSON content type is read as
/// empty, so validation reports the missing required fields.
fn candidate_from(
    body: Result<Json<RecipeCandidate>, JsonRejection>,
) -> Result<RecipeCandidate, ApiError> {
    match body {
        Ok(Json(candidate)) => Ok(candidate),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(RecipeCandidate::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        recipe_core::RecipeCandidate,
        recipe_core::Category,
        recipe_core::Difficulty,
        recipe_core::RecipeId,
        get::RecipeResponse,
        get::RecipeEnvelope,
        list::ListRecipesResponse,
        delete::DeleteRecipeResponse,
        delete::EmptyObject,
    ))
)]
pub struct ApiDoc;
