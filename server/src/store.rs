//! PostgreSQL-backed recipe store and backend selection.

use crate::config::StoreBackend;
use crate::db::{self, DbPool};
use crate::models::{RecipeRow, RecipeWrite};
use crate::schema::recipes;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use recipe_core::{
    MemoryStore, Recipe, RecipeFields, RecipeFilter, RecipeId, RecipeStore, StoreError,
};
use std::fmt;
use std::sync::Arc;

/// Build the store selected by configuration.
pub fn create_store(backend: &StoreBackend) -> anyhow::Result<Arc<dyn RecipeStore>> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url)?;
            Ok(Arc::new(PgRecipeStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recipe store, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl fmt::Debug for PgRecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRecipeStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a blocking diesel operation on the blocking thread pool.
    async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let _span = tracing::debug_span!("db.query", op).entered();
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("{} task failed: {}", op, e)))?
    }
}

fn store_error(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let field = info
                .column_name()
                .or(info.constraint_name())
                .unwrap_or("unknown")
                .to_string();
            StoreError::DuplicateKey { field }
        }
        other => StoreError::Backend(other.to_string()),
    }
}

/// ILIKE pattern matching `term` anywhere, with wildcards in `term` escaped.
fn contains_pattern(term: &str) -> String {
    format!(
        "%{}%",
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        self.run("insert", move |conn| {
            let row: RecipeRow = diesel::insert_into(recipes::table)
                .values(RecipeWrite::from(&fields))
                .returning(RecipeRow::as_returning())
                .get_result(conn)
                .map_err(store_error)?;
            row.into_recipe()
        })
        .await
    }

    async fn find(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let filter = filter.clone();

        self.run("find", move |conn| {
            let mut query = recipes::table.into_boxed();

            if let Some(category) = filter.category {
                query = query.filter(recipes::category.eq(category));
            }
            if let Some(difficulty) = filter.difficulty {
                query = query.filter(recipes::difficulty.eq(difficulty));
            }
            if let Some(search) = filter.search {
                query = query.filter(recipes::name.ilike(contains_pattern(&search)));
            }

            let rows: Vec<RecipeRow> = query
                .order(recipes::created_at.desc())
                .select(RecipeRow::as_select())
                .load(conn)
                .map_err(store_error)?;

            rows.into_iter().map(RecipeRow::into_recipe).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        self.run("find_by_id", move |conn| {
            let row: Option<RecipeRow> = recipes::table
                .find(id.as_uuid())
                .select(RecipeRow::as_select())
                .first(conn)
                .optional()
                .map_err(store_error)?;
            row.map(RecipeRow::into_recipe).transpose()
        })
        .await
    }

    async fn update_by_id(
        &self,
        id: RecipeId,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        self.run("update_by_id", move |conn| {
            let row: Option<RecipeRow> = diesel::update(recipes::table.find(id.as_uuid()))
                .set((
                    RecipeWrite::from(&fields),
                    recipes::updated_at.eq(Utc::now()),
                ))
                .returning(RecipeRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(store_error)?;
            row.map(RecipeRow::into_recipe).transpose()
        })
        .await
    }

    async fn delete_by_id(&self, id: RecipeId) -> Result<bool, StoreError> {
        self.run("delete_by_id", move |conn| {
            let deleted = diesel::delete(recipes::table.find(id.as_uuid()))
                .execute(conn)
                .map_err(store_error)?;
            Ok(deleted > 0)
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
