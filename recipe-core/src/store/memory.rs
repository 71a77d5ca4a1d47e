//! In-memory recipe store.
//!
//! Keeps recipes in insertion order, which is also creation order, so ties
//! on `created_at` still list newest first.

use super::{RecipeFilter, RecipeStore};
use crate::error::StoreError;
use crate::types::{Recipe, RecipeFields, RecipeId};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let now = Utc::now();
        let recipe = Recipe {
            id: RecipeId::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };

        self.write()?.push(recipe.clone());
        Ok(recipe)
    }

    async fn find(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.read()?;

        // Reverse first so the stable sort keeps later inserts ahead on ties
        let mut found: Vec<Recipe> = recipes
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(found)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: RecipeId,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut recipes = self.write()?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        recipe.fields = fields;
        recipe.updated_at = Utc::now().max(recipe.created_at);

        Ok(Some(recipe.clone()))
    }

    async fn delete_by_id(&self, id: RecipeId) -> Result<bool, StoreError> {
        let mut recipes = self.write()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
