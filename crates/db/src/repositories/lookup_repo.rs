//! Repository for the simple master-data lookup tables.
//!
//! One implementation serves every [`MasterDataKind`]; the table name is
//! interpolated from the enum, never from caller-supplied text.

use sqlx::PgPool;
use seeker_core::master_data::MasterDataKind;
use seeker_core::types::DbId;

use crate::models::lookup::{CreateLookupItem, LookupItem, UpdateLookupItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for lookup rows of any kind.
pub struct LookupRepo;

impl LookupRepo {
    /// Insert a new row, returning it.
    pub async fn create(
        pool: &PgPool,
        kind: MasterDataKind,
        input: &CreateLookupItem,
    ) -> Result<LookupItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (name, description, sort_order, is_active) \
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, true)) \
             RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, LookupItem>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a row by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: MasterDataKind,
        id: DbId,
    ) -> Result<Option<LookupItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, LookupItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active row with `id` exists.
    pub async fn exists_active(
        pool: &PgPool,
        kind: MasterDataKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1 AND is_active = true)",
            kind.table()
        );
        let (exists,): (bool,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
        Ok(exists)
    }

    /// List rows, optionally including inactive ones.
    ///
    /// Ordered by sort_order, then name.
    pub async fn list(
        pool: &PgPool,
        kind: MasterDataKind,
        include_inactive: bool,
    ) -> Result<Vec<LookupItem>, sqlx::Error> {
        let filter = if include_inactive {
            ""
        } else {
            "WHERE is_active = true "
        };
        let query = format!(
            "SELECT {COLUMNS} FROM {} {filter}ORDER BY sort_order, name",
            kind.table()
        );
        sqlx::query_as::<_, LookupItem>(&query).fetch_all(pool).await
    }

    /// Update a row. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        kind: MasterDataKind,
        id: DbId,
        input: &UpdateLookupItem,
    ) -> Result<Option<LookupItem>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                sort_order = COALESCE($4, sort_order), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, LookupItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a row. Fails with a foreign-key violation while referenced.
    pub async fn delete(
        pool: &PgPool,
        kind: MasterDataKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
