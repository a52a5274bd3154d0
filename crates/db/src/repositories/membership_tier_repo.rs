//! Repository for the `membership_tiers` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::membership_tier::{
    CreateMembershipTier, MembershipTier, UpdateMembershipTier,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, annual_fee, currency_code, duration_months, \
                       sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for membership tiers.
pub struct MembershipTierRepo;

impl MembershipTierRepo {
    /// Insert a new tier. `duration_months` defaults to 12.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMembershipTier,
    ) -> Result<MembershipTier, sqlx::Error> {
        let query = format!(
            "INSERT INTO membership_tiers \
                (name, description, annual_fee, currency_code, duration_months, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 12), COALESCE($6, 0), COALESCE($7, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MembershipTier>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.annual_fee)
            .bind(&input.currency_code)
            .bind(input.duration_months)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MembershipTier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM membership_tiers WHERE id = $1");
        sqlx::query_as::<_, MembershipTier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<MembershipTier>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM membership_tiers ORDER BY sort_order, name")
        } else {
            format!(
                "SELECT {COLUMNS} FROM membership_tiers WHERE is_active = true \
                 ORDER BY sort_order, name"
            )
        };
        sqlx::query_as::<_, MembershipTier>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMembershipTier,
    ) -> Result<Option<MembershipTier>, sqlx::Error> {
        let query = format!(
            "UPDATE membership_tiers SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                annual_fee = COALESCE($4, annual_fee), \
                currency_code = COALESCE($5, currency_code), \
                duration_months = COALESCE($6, duration_months), \
                sort_order = COALESCE($7, sort_order), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MembershipTier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.annual_fee)
            .bind(&input.currency_code)
            .bind(input.duration_months)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM membership_tiers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
