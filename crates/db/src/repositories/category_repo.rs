//! Repository for the `categories` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, domain_group_id, name, description, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (domain_group_id, name, description, sort_order, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.domain_group_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories, optionally restricted to one domain group.
    ///
    /// Ordered by domain group, sort_order, then name.
    pub async fn list(
        pool: &PgPool,
        domain_group_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE ($1::BIGINT IS NULL OR domain_group_id = $1) \
               AND ($2 OR is_active = true) \
             ORDER BY domain_group_id, sort_order, name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(domain_group_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                domain_group_id = COALESCE($2, domain_group_id), \
                name = COALESCE($3, name), \
                description = COALESCE($4, description), \
                sort_order = COALESCE($5, sort_order), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.domain_group_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
