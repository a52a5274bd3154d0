//! Repository for the `countries` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::country::{Country, CreateCountry, UpdateCountry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, phone_code, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for countries.
pub struct CountryRepo;

impl CountryRepo {
    /// Insert a new country, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCountry) -> Result<Country, sqlx::Error> {
        let query = format!(
            "INSERT INTO countries (code, name, phone_code, sort_order, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.phone_code)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a country by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM countries WHERE id = $1");
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List countries, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Country>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM countries ORDER BY sort_order, name")
        } else {
            format!(
                "SELECT {COLUMNS} FROM countries WHERE is_active = true ORDER BY sort_order, name"
            )
        };
        sqlx::query_as::<_, Country>(&query).fetch_all(pool).await
    }

    /// Update a country. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCountry,
    ) -> Result<Option<Country>, sqlx::Error> {
        let query = format!(
            "UPDATE countries SET \
                code = COALESCE($2, code), \
                name = COALESCE($3, name), \
                phone_code = COALESCE($4, phone_code), \
                sort_order = COALESCE($5, sort_order), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.phone_code)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a country. Fails with a foreign-key violation while referenced.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
