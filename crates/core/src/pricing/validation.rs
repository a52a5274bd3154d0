//! Write-time checks for pricing templates, rules and overrides.
//!
//! The calculator tolerates odd rows (it skips what it cannot interpret);
//! these checks keep admins from storing them in the first place.

use rust_decimal::{Decimal, RoundingStrategy};

use super::{AdjustmentType, ConditionType, FeeField, TemplateType, ALL_FEES_TARGET};
use crate::error::CoreError;
use crate::master_data::{normalize_currency_code, validate_fee_amount, MAX_NAME_LENGTH};
use crate::membership::MembershipStatus;

/// Largest magnitude a `NUMERIC(14,4)` adjustment or override column holds:
/// 9,999,999,999.9999.
pub const MAX_ADJUSTMENT_VALUE: Decimal =
    Decimal::from_parts(276_447_231, 23_283, 0, false, 4);

/// Borrowed view of a template's writable fields, after merging any update.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDefinition<'a> {
    pub template_name: &'a str,
    pub engagement_model: &'a str,
    pub template_type: &'a str,
    pub base_platform_fee_percentage: Decimal,
    pub base_quarterly_fee: Decimal,
    pub base_half_yearly_fee: Decimal,
    pub base_annual_fee: Decimal,
    pub currency_code: &'a str,
}

/// Borrowed view of a rule's writable fields, after merging any update.
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition<'a> {
    pub rule_name: &'a str,
    pub rule_type: &'a str,
    pub target_field: &'a str,
    pub condition_type: &'a str,
    pub condition_value: &'a str,
    pub adjustment_type: &'a str,
    pub adjustment_value: Decimal,
    pub priority: i32,
}

/// Validate a template. Returns the normalised currency code.
pub fn validate_template_definition(def: &TemplateDefinition<'_>) -> Result<String, CoreError> {
    require_text("template_name", def.template_name)?;
    require_text("engagement_model", def.engagement_model)?;

    if TemplateType::parse(def.template_type).is_none() {
        return Err(CoreError::Validation(format!(
            "template_type must be 'marketplace' or 'paas', got '{}'",
            def.template_type
        )));
    }

    validate_percentage("base_platform_fee_percentage", def.base_platform_fee_percentage)?;
    for (field, value) in [
        ("base_quarterly_fee", def.base_quarterly_fee),
        ("base_half_yearly_fee", def.base_half_yearly_fee),
        ("base_annual_fee", def.base_annual_fee),
    ] {
        validate_fee_amount(field, value)?;
    }

    normalize_currency_code(def.currency_code)
}

/// Validate a rule definition.
pub fn validate_rule_definition(def: &RuleDefinition<'_>) -> Result<(), CoreError> {
    require_text("rule_name", def.rule_name)?;
    require_text("rule_type", def.rule_type)?;

    if def.target_field != ALL_FEES_TARGET && FeeField::parse(def.target_field).is_none() {
        return Err(CoreError::Validation(format!(
            "Unknown target_field '{}'",
            def.target_field
        )));
    }

    let condition = ConditionType::from(def.condition_type);
    if !condition.is_known() {
        return Err(CoreError::Validation(format!(
            "Unknown condition_type '{}'",
            def.condition_type
        )));
    }
    require_text("condition_value", def.condition_value)?;
    if condition == ConditionType::MembershipStatus
        && MembershipStatus::parse(def.condition_value).is_none()
    {
        return Err(CoreError::Validation(format!(
            "condition_value for membership_status must be 'Member' or 'Non-Member', got '{}'",
            def.condition_value
        )));
    }

    match AdjustmentType::try_from(def.adjustment_type)? {
        AdjustmentType::Percentage => {
            validate_percentage("adjustment_value", def.adjustment_value)?
        }
        AdjustmentType::Multiplier if def.adjustment_value.is_sign_negative() => {
            return Err(CoreError::Validation(
                "multiplier adjustment_value must not be negative".into(),
            ));
        }
        AdjustmentType::Multiplier | AdjustmentType::FixedAmount => {
            validate_magnitude("adjustment_value", def.adjustment_value)?
        }
    }

    if def.priority < 0 {
        return Err(CoreError::Validation("priority must not be negative".into()));
    }

    Ok(())
}

/// Validate an override's target field, pinned value and membership filter.
pub fn validate_override_definition(
    target_field: &str,
    override_value: Decimal,
    membership_status: Option<&str>,
) -> Result<(), CoreError> {
    let field = FeeField::parse(target_field).ok_or_else(|| {
        CoreError::Validation(format!("Unknown target_field '{target_field}'"))
    })?;

    if field == FeeField::PlatformFeePercentage {
        validate_percentage("override_value", override_value)?;
    } else if override_value.is_sign_negative() {
        return Err(CoreError::Validation(
            "override_value must not be negative".into(),
        ));
    } else {
        validate_magnitude("override_value", override_value)?;
    }

    if let Some(status) = membership_status {
        if MembershipStatus::parse(status).is_none() {
            return Err(CoreError::Validation(format!(
                "membership_status must be 'Member' or 'Non-Member', got '{status}'"
            )));
        }
    }

    Ok(())
}

fn validate_percentage(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(CoreError::Validation(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

fn validate_magnitude(field: &str, value: Decimal) -> Result<(), CoreError> {
    let rounded = value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() > MAX_ADJUSTMENT_VALUE {
        return Err(CoreError::Validation(format!(
            "{field} magnitude must be at most {MAX_ADJUSTMENT_VALUE}, got {value}"
        )));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn template_def() -> TemplateDefinition<'static> {
        TemplateDefinition {
            template_name: "Marketplace standard",
            engagement_model: "Marketplace",
            template_type: "marketplace",
            base_platform_fee_percentage: dec!(15),
            base_quarterly_fee: dec!(500),
            base_half_yearly_fee: dec!(900),
            base_annual_fee: dec!(1600),
            currency_code: "usd",
        }
    }

    fn rule_def() -> RuleDefinition<'static> {
        RuleDefinition {
            rule_name: "Member discount",
            rule_type: "member_discount",
            target_field: "all_fees",
            condition_type: "membership_status",
            condition_value: "Member",
            adjustment_type: "percentage",
            adjustment_value: dec!(10),
            priority: 1,
        }
    }

    #[test]
    fn valid_template_normalises_currency() {
        assert_eq!(validate_template_definition(&template_def()).unwrap(), "USD");
    }

    #[test]
    fn template_rejects_unknown_type() {
        let mut def = template_def();
        def.template_type = "subscription";
        assert_matches!(
            validate_template_definition(&def),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn template_rejects_negative_fee_and_bad_percentage() {
        let mut def = template_def();
        def.base_annual_fee = dec!(-1);
        assert!(validate_template_definition(&def).is_err());

        let mut def = template_def();
        def.base_platform_fee_percentage = dec!(100.5);
        assert!(validate_template_definition(&def).is_err());
    }

    #[test]
    fn template_fees_must_fit_their_column() {
        let mut def = template_def();
        def.base_quarterly_fee = dec!(999999999999.99);
        assert!(validate_template_definition(&def).is_ok());

        def.base_quarterly_fee = dec!(10000000000000);
        assert_matches!(
            validate_template_definition(&def),
            Err(CoreError::Validation(msg)) if msg.contains("base_quarterly_fee")
        );
    }

    #[test]
    fn valid_rule_passes() {
        assert!(validate_rule_definition(&rule_def()).is_ok());
    }

    #[test]
    fn rule_rejects_unknown_names() {
        let mut def = rule_def();
        def.target_field = "setup_fee";
        assert!(validate_rule_definition(&def).is_err());

        let mut def = rule_def();
        def.condition_type = "industry_segment";
        assert!(validate_rule_definition(&def).is_err());

        let mut def = rule_def();
        def.adjustment_type = "discount";
        assert!(validate_rule_definition(&def).is_err());
    }

    #[test]
    fn rule_checks_membership_condition_value() {
        let mut def = rule_def();
        def.condition_value = "Gold";
        assert!(validate_rule_definition(&def).is_err());
    }

    #[test]
    fn rule_value_bounds_depend_on_adjustment_type() {
        let mut def = rule_def();
        def.adjustment_value = dec!(120);
        assert!(validate_rule_definition(&def).is_err());

        def.adjustment_type = "fixed_amount";
        assert!(validate_rule_definition(&def).is_ok());

        def.adjustment_type = "multiplier";
        def.adjustment_value = dec!(-0.5);
        assert!(validate_rule_definition(&def).is_err());
    }

    #[test]
    fn rule_values_must_fit_their_column() {
        let mut def = rule_def();
        def.adjustment_type = "multiplier";
        def.adjustment_value = MAX_ADJUSTMENT_VALUE;
        assert!(validate_rule_definition(&def).is_ok());

        def.adjustment_value = dec!(100000000000);
        assert!(validate_rule_definition(&def).is_err());

        def.adjustment_type = "fixed_amount";
        def.adjustment_value = dec!(-100000000000);
        assert_matches!(
            validate_rule_definition(&def),
            Err(CoreError::Validation(msg)) if msg.contains("adjustment_value")
        );
        def.adjustment_value = -MAX_ADJUSTMENT_VALUE;
        assert!(validate_rule_definition(&def).is_ok());
    }

    #[test]
    fn rule_rejects_negative_priority() {
        let mut def = rule_def();
        def.priority = -1;
        assert!(validate_rule_definition(&def).is_err());
    }

    #[test]
    fn override_checks() {
        assert!(validate_override_definition("annualFee", dec!(1200), Some("Member")).is_ok());
        assert!(validate_override_definition("all_fees", dec!(1), None).is_err());
        assert!(validate_override_definition("platform_fee_percentage", dec!(101), None).is_err());
        assert!(validate_override_definition("annual_fee", dec!(-5), None).is_err());
        assert!(validate_override_definition("annual_fee", dec!(5), Some("VIP")).is_err());
        assert!(validate_override_definition("annual_fee", dec!(100000000000), None).is_err());
        assert!(validate_override_definition("annual_fee", MAX_ADJUSTMENT_VALUE, None).is_ok());
    }
}
