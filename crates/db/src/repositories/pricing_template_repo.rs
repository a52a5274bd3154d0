//! Repository for the `pricing_templates` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::pricing::{CreatePricingTemplate, PricingTemplate, UpdatePricingTemplate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, template_name, engagement_model, template_type, \
                       base_platform_fee_percentage, base_quarterly_fee, base_half_yearly_fee, \
                       base_annual_fee, currency_code, internal_pricing, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for pricing templates.
pub struct PricingTemplateRepo;

impl PricingTemplateRepo {
    /// Insert a new template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePricingTemplate,
    ) -> Result<PricingTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing_templates \
                (template_name, engagement_model, template_type, base_platform_fee_percentage, \
                 base_quarterly_fee, base_half_yearly_fee, base_annual_fee, currency_code, \
                 internal_pricing, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, '{{}}'::jsonb), COALESCE($10, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingTemplate>(&query)
            .bind(&input.template_name)
            .bind(&input.engagement_model)
            .bind(&input.template_type)
            .bind(input.base_platform_fee_percentage)
            .bind(input.base_quarterly_fee)
            .bind(input.base_half_yearly_fee)
            .bind(input.base_annual_fee)
            .bind(&input.currency_code)
            .bind(&input.internal_pricing)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PricingTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing_templates WHERE id = $1");
        sqlx::query_as::<_, PricingTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List templates ordered by name (ties by id), which is the order the
    /// calculator scans them in.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<PricingTemplate>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM pricing_templates ORDER BY template_name, id")
        } else {
            format!(
                "SELECT {COLUMNS} FROM pricing_templates WHERE is_active = true \
                 ORDER BY template_name, id"
            )
        };
        sqlx::query_as::<_, PricingTemplate>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePricingTemplate,
    ) -> Result<Option<PricingTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE pricing_templates SET \
                template_name = COALESCE($2, template_name), \
                engagement_model = COALESCE($3, engagement_model), \
                template_type = COALESCE($4, template_type), \
                base_platform_fee_percentage = COALESCE($5, base_platform_fee_percentage), \
                base_quarterly_fee = COALESCE($6, base_quarterly_fee), \
                base_half_yearly_fee = COALESCE($7, base_half_yearly_fee), \
                base_annual_fee = COALESCE($8, base_annual_fee), \
                currency_code = COALESCE($9, currency_code), \
                internal_pricing = COALESCE($10, internal_pricing), \
                is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingTemplate>(&query)
            .bind(id)
            .bind(&input.template_name)
            .bind(&input.engagement_model)
            .bind(&input.template_type)
            .bind(input.base_platform_fee_percentage)
            .bind(input.base_quarterly_fee)
            .bind(input.base_half_yearly_fee)
            .bind(input.base_annual_fee)
            .bind(&input.currency_code)
            .bind(&input.internal_pricing)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pricing_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
