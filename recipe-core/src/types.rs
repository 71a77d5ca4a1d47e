use crate::error::InvalidRecipeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for RecipeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecipeId {
    type Err = InvalidRecipeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidRecipeId {
                value: s.to_string(),
            })
    }
}

/// Recipe category. Stored and compared in lower case.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Appetizer,
    #[serde(rename = "main course")]
    MainCourse,
    Dessert,
    Beverage,
    Salad,
    Soup,
    Snack,
    Breakfast,
    #[default]
    Other,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Appetizer,
        Category::MainCourse,
        Category::Dessert,
        Category::Beverage,
        Category::Salad,
        Category::Soup,
        Category::Snack,
        Category::Breakfast,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Appetizer => "appetizer",
            Category::MainCourse => "main course",
            Category::Dessert => "dessert",
            Category::Beverage => "beverage",
            Category::Salad => "salad",
            Category::Soup => "soup",
            Category::Snack => "snack",
            Category::Breakfast => "breakfast",
            Category::Other => "other",
        }
    }

    /// Matches an already-normalized (trimmed, lower-cased) value.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Matches an already-normalized (trimmed, lower-cased) value.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated recipe fields as supplied by a client.
///
/// Every field is optional so that absence can be told apart from an
/// explicit (possibly invalid) value. JSON `null` counts as absent.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub servings: Option<i64>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub image_url: Option<String>,
}

/// Validated, normalized writable fields of a recipe.
///
/// Only [`crate::validate`] produces values of this type from client input,
/// so anything handed to a store already satisfies the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub category: Category,
    pub difficulty: Difficulty,
    pub image_url: Option<String>,
}

impl RecipeFields {
    /// Derived on demand from prep and cook time; never stored.
    pub fn total_time(&self) -> i64 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

/// A persisted recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub fields: RecipeFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn total_time(&self) -> i64 {
        self.fields.total_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_as_str() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_category_parse_expects_normalized_input() {
        assert_eq!(Category::parse("main course"), Some(Category::MainCourse));
        assert_eq!(Category::parse("Main Course"), None);
        assert_eq!(Category::parse("brunch"), None);
    }

    #[test]
    fn test_category_serializes_with_space() {
        let json = serde_json::to_string(&Category::MainCourse).unwrap();
        assert_eq!(json, "\"main course\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_recipe_id_parse() {
        let id: RecipeId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");

        let err = "not-an-id".parse::<RecipeId>().unwrap_err();
        assert_eq!(err.value, "not-an-id");
    }

    #[test]
    fn test_total_time_saturates() {
        let fields = RecipeFields {
            name: "Toast".to_string(),
            ingredients: vec!["bread".to_string()],
            instructions: "Toast the bread well.".to_string(),
            prep_time: i64::MAX,
            cook_time: 5,
            servings: 1,
            category: Category::Breakfast,
            difficulty: Difficulty::Easy,
            image_url: None,
        };
        assert_eq!(fields.total_time(), i64::MAX);
    }
}
