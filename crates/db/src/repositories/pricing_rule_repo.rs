//! Repository for the `pricing_rules` table.

use sqlx::PgPool;
use seeker_core::types::DbId;

use crate::models::pricing::{CreatePricingRule, PricingRule, UpdatePricingRule};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rule_name, rule_type, target_field, condition_type, condition_value, \
                       adjustment_type, adjustment_value, priority, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for pricing rules.
pub struct PricingRuleRepo;

impl PricingRuleRepo {
    /// Insert a new rule, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePricingRule,
    ) -> Result<PricingRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing_rules \
                (rule_name, rule_type, target_field, condition_type, condition_value, \
                 adjustment_type, adjustment_value, priority, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), COALESCE($9, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingRule>(&query)
            .bind(&input.rule_name)
            .bind(&input.rule_type)
            .bind(&input.target_field)
            .bind(&input.condition_type)
            .bind(&input.condition_value)
            .bind(&input.adjustment_type)
            .bind(input.adjustment_value)
            .bind(input.priority)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PricingRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing_rules WHERE id = $1");
        sqlx::query_as::<_, PricingRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rules ordered by priority (ties by id).
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<PricingRule>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM pricing_rules ORDER BY priority, id")
        } else {
            format!(
                "SELECT {COLUMNS} FROM pricing_rules WHERE is_active = true ORDER BY priority, id"
            )
        };
        sqlx::query_as::<_, PricingRule>(&query).fetch_all(pool).await
    }

    /// Update a rule. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePricingRule,
    ) -> Result<Option<PricingRule>, sqlx::Error> {
        let query = format!(
            "UPDATE pricing_rules SET \
                rule_name = COALESCE($2, rule_name), \
                rule_type = COALESCE($3, rule_type), \
                target_field = COALESCE($4, target_field), \
                condition_type = COALESCE($5, condition_type), \
                condition_value = COALESCE($6, condition_value), \
                adjustment_type = COALESCE($7, adjustment_type), \
                adjustment_value = COALESCE($8, adjustment_value), \
                priority = COALESCE($9, priority), \
                is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingRule>(&query)
            .bind(id)
            .bind(&input.rule_name)
            .bind(&input.rule_type)
            .bind(&input.target_field)
            .bind(&input.condition_type)
            .bind(&input.condition_value)
            .bind(&input.adjustment_type)
            .bind(input.adjustment_value)
            .bind(input.priority)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pricing_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
