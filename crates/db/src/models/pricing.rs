//! Pricing template, rule and override models and DTOs.
//!
//! Rows keep the stored strings as-is; conversion into the calculator's
//! domain types happens through the `From` / `TryFrom` impls below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::error::CoreError;
use seeker_core::pricing::{self, AdjustmentType, ConditionType};
use seeker_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A row from the `pricing_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingTemplate {
    pub id: DbId,
    pub template_name: String,
    pub engagement_model: String,
    pub template_type: String,
    pub base_platform_fee_percentage: Decimal,
    pub base_quarterly_fee: Decimal,
    pub base_half_yearly_fee: Decimal,
    pub base_annual_fee: Decimal,
    pub currency_code: String,
    pub internal_pricing: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePricingTemplate {
    pub template_name: String,
    pub engagement_model: String,
    pub template_type: String,
    pub base_platform_fee_percentage: Decimal,
    pub base_quarterly_fee: Decimal,
    pub base_half_yearly_fee: Decimal,
    pub base_annual_fee: Decimal,
    pub currency_code: String,
    pub internal_pricing: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePricingTemplate {
    pub template_name: Option<String>,
    pub engagement_model: Option<String>,
    pub template_type: Option<String>,
    pub base_platform_fee_percentage: Option<Decimal>,
    pub base_quarterly_fee: Option<Decimal>,
    pub base_half_yearly_fee: Option<Decimal>,
    pub base_annual_fee: Option<Decimal>,
    pub currency_code: Option<String>,
    pub internal_pricing: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

impl From<&PricingTemplate> for pricing::PricingTemplate {
    fn from(row: &PricingTemplate) -> Self {
        Self {
            id: row.id,
            template_name: row.template_name.clone(),
            engagement_model: row.engagement_model.clone(),
            template_type: row.template_type.clone(),
            base_platform_fee_percentage: row.base_platform_fee_percentage,
            base_quarterly_fee: row.base_quarterly_fee,
            base_half_yearly_fee: row.base_half_yearly_fee,
            base_annual_fee: row.base_annual_fee,
            currency_code: row.currency_code.clone(),
            internal_pricing: row.internal_pricing.clone(),
            is_active: row.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A row from the `pricing_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingRule {
    pub id: DbId,
    pub rule_name: String,
    pub rule_type: String,
    pub target_field: String,
    pub condition_type: String,
    pub condition_value: String,
    pub adjustment_type: String,
    pub adjustment_value: Decimal,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePricingRule {
    pub rule_name: String,
    pub rule_type: String,
    pub target_field: String,
    pub condition_type: String,
    pub condition_value: String,
    pub adjustment_type: String,
    pub adjustment_value: Decimal,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePricingRule {
    pub rule_name: Option<String>,
    pub rule_type: Option<String>,
    pub target_field: Option<String>,
    pub condition_type: Option<String>,
    pub condition_value: Option<String>,
    pub adjustment_type: Option<String>,
    pub adjustment_value: Option<Decimal>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
}

/// Fails only when the stored adjustment type is unknown; unknown
/// condition types convert to [`ConditionType::Other`] and simply never match.
impl TryFrom<&PricingRule> for pricing::PricingRule {
    type Error = CoreError;

    fn try_from(row: &PricingRule) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            rule_name: row.rule_name.clone(),
            rule_type: row.rule_type.clone(),
            target_field: row.target_field.clone(),
            condition_type: ConditionType::from(row.condition_type.as_str()),
            condition_value: row.condition_value.clone(),
            adjustment_type: AdjustmentType::try_from(row.adjustment_type.as_str())?,
            adjustment_value: row.adjustment_value,
            priority: row.priority,
            is_active: row.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// A row from the `pricing_overrides` table.
///
/// Every dimension column is optional; `None` means "any".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingOverride {
    pub id: DbId,
    pub country_id: Option<DbId>,
    pub organization_type_id: Option<DbId>,
    pub entity_type_id: Option<DbId>,
    pub engagement_model_id: Option<DbId>,
    pub membership_status: Option<String>,
    pub target_field: String,
    pub override_value: Decimal,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePricingOverride {
    pub country_id: Option<DbId>,
    pub organization_type_id: Option<DbId>,
    pub entity_type_id: Option<DbId>,
    pub engagement_model_id: Option<DbId>,
    pub membership_status: Option<String>,
    pub target_field: String,
    pub override_value: Decimal,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update. Dimension ids can be changed but not cleared; delete and
/// recreate the override to widen it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePricingOverride {
    pub country_id: Option<DbId>,
    pub organization_type_id: Option<DbId>,
    pub entity_type_id: Option<DbId>,
    pub engagement_model_id: Option<DbId>,
    pub membership_status: Option<String>,
    pub target_field: Option<String>,
    pub override_value: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(adjustment_type: &str, condition_type: &str) -> PricingRule {
        PricingRule {
            id: 9,
            rule_name: "Startup discount".into(),
            rule_type: "org_type_discount".into(),
            target_field: "annual_fee".into(),
            condition_type: condition_type.into(),
            condition_value: "Startup".into(),
            adjustment_type: adjustment_type.into(),
            adjustment_value: dec!(25),
            priority: 3,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn rule_row_converts_to_domain_rule() {
        let rule = pricing::PricingRule::try_from(&row("percentage", "organization_type")).unwrap();
        assert_eq!(rule.adjustment_type, AdjustmentType::Percentage);
        assert_eq!(rule.condition_type, ConditionType::OrganizationType);
        assert_eq!(rule.priority, 3);
    }

    #[test]
    fn unknown_adjustment_type_fails_conversion() {
        assert!(pricing::PricingRule::try_from(&row("bonus", "organization_type")).is_err());
    }

    #[test]
    fn unknown_condition_type_still_converts() {
        let rule = pricing::PricingRule::try_from(&row("multiplier", "segment")).unwrap();
        assert_eq!(rule.condition_type, ConditionType::Other("segment".into()));
    }
}
