//! Repository for the `pricing_overrides` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::pricing::{CreatePricingOverride, PricingOverride, UpdatePricingOverride};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, country_id, organization_type_id, entity_type_id, engagement_model_id, \
                       membership_status, target_field, override_value, notes, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for pricing overrides.
pub struct PricingOverrideRepo;

impl PricingOverrideRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePricingOverride,
    ) -> Result<PricingOverride, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing_overrides \
                (country_id, organization_type_id, entity_type_id, engagement_model_id, \
                 membership_status, target_field, override_value, notes, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingOverride>(&query)
            .bind(input.country_id)
            .bind(input.organization_type_id)
            .bind(input.entity_type_id)
            .bind(input.engagement_model_id)
            .bind(&input.membership_status)
            .bind(&input.target_field)
            .bind(input.override_value)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PricingOverride>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing_overrides WHERE id = $1");
        sqlx::query_as::<_, PricingOverride>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<PricingOverride>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM pricing_overrides ORDER BY id")
        } else {
            format!("SELECT {COLUMNS} FROM pricing_overrides WHERE is_active = true ORDER BY id")
        };
        sqlx::query_as::<_, PricingOverride>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePricingOverride,
    ) -> Result<Option<PricingOverride>, sqlx::Error> {
        let query = format!(
            "UPDATE pricing_overrides SET \
                country_id = COALESCE($2, country_id), \
                organization_type_id = COALESCE($3, organization_type_id), \
                entity_type_id = COALESCE($4, entity_type_id), \
                engagement_model_id = COALESCE($5, engagement_model_id), \
                membership_status = COALESCE($6, membership_status), \
                target_field = COALESCE($7, target_field), \
                override_value = COALESCE($8, override_value), \
                notes = COALESCE($9, notes), \
                is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingOverride>(&query)
            .bind(id)
            .bind(input.country_id)
            .bind(input.organization_type_id)
            .bind(input.entity_type_id)
            .bind(input.engagement_model_id)
            .bind(&input.membership_status)
            .bind(&input.target_field)
            .bind(input.override_value)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pricing_overrides WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
