pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{FieldViolation, InvalidRecipeId, StoreError, ValidationError};
pub use store::{MemoryStore, RecipeFilter, RecipeStore};
pub use types::{Category, Difficulty, Recipe, RecipeCandidate, RecipeFields, RecipeId};
pub use validation::validate;
