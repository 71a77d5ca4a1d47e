//! Recipe persistence abstraction.
//!
//! Handlers only ever see [`RecipeStore`]. The server wires in a PostgreSQL
//! implementation; [`MemoryStore`] backs tests and local runs.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::{Recipe, RecipeFields, RecipeId};
use crate::validation::normalize_enum_value;
use async_trait::async_trait;
use std::fmt;

/// Criteria for listing recipes. Absent criteria impose no constraint;
/// present ones are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Lower-cased category to match exactly.
    pub category: Option<String>,
    /// Lower-cased difficulty to match exactly.
    pub difficulty: Option<String>,
    /// Case-insensitive substring of the recipe name.
    pub search: Option<String>,
}

impl RecipeFilter {
    /// Build a filter from raw query parameters. Empty values are ignored.
    pub fn from_params(
        category: Option<&str>,
        difficulty: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            category: non_empty(category).map(normalize_enum_value),
            difficulty: non_empty(difficulty).map(normalize_enum_value),
            search: non_empty(search).map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none() && self.search.is_none()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(ref category) = self.category {
            if recipe.fields.category.as_str() != category.as_str() {
                return false;
            }
        }

        if let Some(ref difficulty) = self.difficulty {
            if recipe.fields.difficulty.as_str() != difficulty.as_str() {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            if !recipe
                .fields
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// A collection of recipes supporting single-document operations.
///
/// Implementations assign ids and timestamps. Operations on a missing id
/// report absence through `None`/`false` rather than an error.
#[async_trait]
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Persist a new recipe, assigning its id, `created_at` and `updated_at`.
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError>;

    /// All recipes matching the filter, newest `created_at` first.
    async fn find(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError>;

    /// Replace every writable field and refresh `updated_at`.
    async fn update_by_id(
        &self,
        id: RecipeId,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError>;

    /// Returns whether a recipe was removed.
    async fn delete_by_id(&self, id: RecipeId) -> Result<bool, StoreError>;

    /// Backend name for logs (e.g., "postgres", "memory").
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Difficulty};
    use chrono::Utc;

    fn recipe(name: &str, category: Category, difficulty: Difficulty) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: RecipeId::new_v4(),
            fields: RecipeFields {
                name: name.to_string(),
                ingredients: vec!["water".to_string()],
                instructions: "Boil for ten minutes.".to_string(),
                prep_time: 0,
                cook_time: 10,
                servings: 1,
                category,
                difficulty,
                image_url: None,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_from_params_lowercases_enums_and_drops_empty() {
        let filter = RecipeFilter::from_params(Some("Main Course"), Some(""), Some("Choc"));
        assert_eq!(filter.category.as_deref(), Some("main course"));
        assert_eq!(filter.difficulty, None);
        assert_eq!(filter.search.as_deref(), Some("Choc"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecipeFilter::from_params(None, None, None);
        assert!(filter.is_empty());
        assert!(filter.matches(&recipe("Soup", Category::Soup, Difficulty::Easy)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = RecipeFilter::from_params(None, None, Some("choc"));
        assert!(filter.matches(&recipe("Chocolate Cake", Category::Dessert, Difficulty::Easy)));
        assert!(filter.matches(&recipe("HOT CHOCOLATE", Category::Beverage, Difficulty::Easy)));
        assert!(!filter.matches(&recipe("Vanilla Cake", Category::Dessert, Difficulty::Easy)));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = RecipeFilter::from_params(Some("DESSERT"), Some("hard"), Some("cake"));
        assert!(filter.matches(&recipe("Layer Cake", Category::Dessert, Difficulty::Hard)));
        assert!(!filter.matches(&recipe("Layer Cake", Category::Dessert, Difficulty::Easy)));
        assert!(!filter.matches(&recipe("Layer Cake", Category::Snack, Difficulty::Hard)));
        assert!(!filter.matches(&recipe("Tart", Category::Dessert, Difficulty::Hard)));
    }
}
