//! Repository for the `currencies` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::currency::{CreateCurrency, Currency, UpdateCurrency};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, symbol, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for currencies.
pub struct CurrencyRepo;

impl CurrencyRepo {
    pub async fn create(pool: &PgPool, input: &CreateCurrency) -> Result<Currency, sqlx::Error> {
        let query = format!(
            "INSERT INTO currencies (code, name, symbol, sort_order, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Currency>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.symbol)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies WHERE id = $1");
        sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Currency>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM currencies ORDER BY sort_order, code")
        } else {
            format!(
                "SELECT {COLUMNS} FROM currencies WHERE is_active = true ORDER BY sort_order, code"
            )
        };
        sqlx::query_as::<_, Currency>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCurrency,
    ) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!(
            "UPDATE currencies SET \
                code = COALESCE($2, code), \
                name = COALESCE($3, name), \
                symbol = COALESCE($4, symbol), \
                sort_order = COALESCE($5, sort_order), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.symbol)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
