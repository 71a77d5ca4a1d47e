use chrono::{DateTime, Utc};
use diesel::prelude::*;
use recipe_core::{Category, Difficulty, Recipe, RecipeFields, StoreError};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub category: String,
    pub difficulty: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeRow {
    /// Convert a row into the domain type. Enum columns that no longer parse
    /// indicate data written outside this service.
    pub fn into_recipe(self) -> Result<Recipe, StoreError> {
        let category = Category::parse(&self.category).ok_or_else(|| {
            StoreError::Backend(format!(
                "Recipe {} has unknown category '{}'",
                self.id, self.category
            ))
        })?;
        let difficulty = Difficulty::parse(&self.difficulty).ok_or_else(|| {
            StoreError::Backend(format!(
                "Recipe {} has unknown difficulty '{}'",
                self.id, self.difficulty
            ))
        })?;

        Ok(Recipe {
            id: self.id.into(),
            fields: RecipeFields {
                name: self.name,
                ingredients: self.ingredients,
                instructions: self.instructions,
                prep_time: self.prep_time,
                cook_time: self.cook_time,
                servings: self.servings,
                category,
                difficulty,
                image_url: self.image_url,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Every writable column. Used both for inserts and for full-replace
/// updates, where a `None` image URL clears the stored one.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeWrite<'a> {
    pub name: &'a str,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a RecipeFields> for RecipeWrite<'a> {
    fn from(fields: &'a RecipeFields) -> Self {
        RecipeWrite {
            name: &fields.name,
            ingredients: &fields.ingredients,
            instructions: &fields.instructions,
            prep_time: fields.prep_time,
            cook_time: fields.cook_time,
            servings: fields.servings,
            category: fields.category.as_str(),
            difficulty: fields.difficulty.as_str(),
            image_url: fields.image_url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str) -> RecipeRow {
        let now = Utc::now();
        RecipeRow {
            id: Uuid::new_v4(),
            name: "Omelette".to_string(),
            ingredients: vec!["eggs".to_string(), "".to_string(), "salt".to_string()],
            instructions: "Whisk and fry gently.".to_string(),
            prep_time: 5,
            cook_time: 5,
            servings: 1,
            category: category.to_string(),
            difficulty: "easy".to_string(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_keeps_every_ingredient_in_order() {
        let recipe = row("breakfast").into_recipe().unwrap();
        assert_eq!(recipe.fields.ingredients, vec!["eggs", "", "salt"]);
        assert_eq!(recipe.fields.category, Category::Breakfast);

        let write = RecipeWrite::from(&recipe.fields);
        assert_eq!(write.ingredients, recipe.fields.ingredients.as_slice());
        assert_eq!(write.category, "breakfast");
    }

    #[test]
    fn test_row_with_unknown_category_is_backend_error() {
        assert!(matches!(
            row("brunch").into_recipe(),
            Err(StoreError::Backend(_))
        ));
    }
}
