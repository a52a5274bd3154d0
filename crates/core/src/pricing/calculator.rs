//! Template + rule layering.

use rust_decimal::Decimal;

use super::{
    AdjustmentType, AppliedRule, FeeBreakdown, FeeField, PricingInput, PricingRule,
    PricingTemplate,
};
use crate::error::CoreError;

/// Compute the fee breakdown for `input`.
///
/// Picks the first active template (in slice order) for the requested
/// engagement model, then applies every active matching rule in ascending
/// `priority`. Rules with equal priority keep their slice order.
///
/// Returns `Ok(None)` when no active template exists for the engagement
/// model; that is "pricing not configured", not an error. Fails with
/// [`CoreError::Internal`] when a rule chain overflows the decimal range.
pub fn calculate_pricing(
    templates: &[PricingTemplate],
    rules: &[PricingRule],
    input: &PricingInput,
) -> Result<Option<FeeBreakdown>, CoreError> {
    let Some(template) = templates
        .iter()
        .find(|t| t.is_active && t.engagement_model == input.engagement_model)
    else {
        return Ok(None);
    };

    let mut breakdown = FeeBreakdown::from_template(template);

    let mut matching: Vec<&PricingRule> = rules
        .iter()
        .filter(|r| r.is_active && r.matches(input))
        .collect();
    matching.sort_by_key(|r| r.priority);

    for rule in matching {
        apply_rule(&mut breakdown, rule)?;
    }

    Ok(Some(breakdown))
}

/// Apply one adjustment to a single value. `None` on decimal overflow.
pub fn apply_adjustment(
    kind: AdjustmentType,
    current: Decimal,
    value: Decimal,
) -> Option<Decimal> {
    match kind {
        AdjustmentType::Multiplier => current.checked_mul(value),
        AdjustmentType::Percentage => {
            let factor = Decimal::ONE.checked_sub(value.checked_div(Decimal::ONE_HUNDRED)?)?;
            current.checked_mul(factor)
        }
        AdjustmentType::FixedAmount => current.checked_add(value),
    }
}

fn apply_rule(breakdown: &mut FeeBreakdown, rule: &PricingRule) -> Result<(), CoreError> {
    let (kind, fields) = if rule.is_blanket_member_discount() {
        // Discounts every field independently, whatever the stored adjustment type.
        (AdjustmentType::Percentage, FeeField::ALL.to_vec())
    } else {
        match FeeField::parse(&rule.target_field) {
            Some(field) => (rule.adjustment_type, vec![field]),
            None => return Ok(()),
        }
    };

    for field in &fields {
        let slot = breakdown.get_mut(*field);
        *slot = apply_adjustment(kind, *slot, rule.adjustment_value).ok_or_else(|| {
            CoreError::Internal(format!(
                "Pricing rule '{}' overflows {}",
                rule.rule_name,
                field.as_str()
            ))
        })?;
    }

    breakdown.applied_rules.push(AppliedRule {
        rule_id: rule.id,
        rule_name: rule.rule_name.clone(),
        adjustment_type: kind,
        fields,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipStatus;
    use crate::pricing::{ConditionType, ALL_FEES_TARGET, MEMBER_DISCOUNT_RULE};
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    // -- Fixtures --

    fn template(id: i64, engagement_model: &str, is_active: bool) -> PricingTemplate {
        PricingTemplate {
            id,
            template_name: format!("{engagement_model} standard"),
            engagement_model: engagement_model.to_string(),
            template_type: "marketplace".to_string(),
            base_platform_fee_percentage: dec!(15),
            base_quarterly_fee: dec!(500),
            base_half_yearly_fee: dec!(900),
            base_annual_fee: dec!(1600),
            currency_code: "USD".to_string(),
            internal_pricing: serde_json::json!({ "tier": "standard" }),
            is_active,
        }
    }

    fn rule(
        id: i64,
        target_field: &str,
        adjustment_type: AdjustmentType,
        adjustment_value: Decimal,
        priority: i32,
    ) -> PricingRule {
        PricingRule {
            id,
            rule_name: format!("rule-{id}"),
            rule_type: "adjustment".to_string(),
            target_field: target_field.to_string(),
            condition_type: ConditionType::MembershipStatus,
            condition_value: "Member".to_string(),
            adjustment_type,
            adjustment_value,
            priority,
            is_active: true,
        }
    }

    fn price(
        templates: &[PricingTemplate],
        rules: &[PricingRule],
        input: &PricingInput,
    ) -> FeeBreakdown {
        calculate_pricing(templates, rules, input)
            .expect("calculation succeeds")
            .expect("a template matches")
    }

    fn input(status: MembershipStatus) -> PricingInput {
        PricingInput {
            engagement_model: "Marketplace".to_string(),
            organization_type: "Startup".to_string(),
            membership_status: status,
            country: Some("India".to_string()),
        }
    }

    // -- apply_adjustment --

    #[test]
    fn percentage_is_a_discount() {
        assert_eq!(
            apply_adjustment(AdjustmentType::Percentage, dec!(500), dec!(20)),
            Some(dec!(400))
        );
    }

    #[test]
    fn multiplier_scales() {
        assert_eq!(
            apply_adjustment(AdjustmentType::Multiplier, dec!(500), dec!(1.5)),
            Some(dec!(750))
        );
    }

    #[test]
    fn fixed_amount_adds_and_may_go_negative() {
        assert_eq!(
            apply_adjustment(AdjustmentType::FixedAmount, dec!(500), dec!(-50)),
            Some(dec!(450))
        );
        assert_eq!(
            apply_adjustment(AdjustmentType::FixedAmount, dec!(10), dec!(-50)),
            Some(dec!(-40))
        );
    }

    // -- calculate_pricing --

    #[test]
    fn base_values_pass_through_without_rules() {
        let templates = vec![template(1, "Marketplace", true)];
        let result = price(&templates, &[], &input(MembershipStatus::Member));

        assert_eq!(result.quarterly_fee, dec!(500));
        assert_eq!(result.half_yearly_fee, dec!(900));
        assert_eq!(result.annual_fee, dec!(1600));
        assert_eq!(result.platform_fee_percentage, dec!(15));
        assert_eq!(result.currency_code, "USD");
        assert_eq!(result.internal_pricing["tier"], "standard");
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn membership_rule_only_applies_to_members() {
        let templates = vec![template(1, "Marketplace", true)];
        let rules = vec![rule(1, "quarterlyFee", AdjustmentType::Percentage, dec!(20), 0)];

        let member = price(&templates, &rules, &input(MembershipStatus::Member));
        assert_eq!(member.quarterly_fee, dec!(400));
        assert_eq!(member.applied_rules.len(), 1);
        assert_eq!(member.applied_rules[0].fields, vec![FeeField::QuarterlyFee]);

        let non_member = price(&templates, &rules, &input(MembershipStatus::NonMember));
        assert_eq!(non_member.quarterly_fee, dec!(500));
        assert!(non_member.applied_rules.is_empty());
    }

    #[test]
    fn rules_apply_in_ascending_priority() {
        let templates = vec![template(1, "Marketplace", true)];

        // fixed (priority 1) then multiplier (priority 2): (500 + 100) * 2
        let fixed_first = vec![
            rule(1, "quarterly_fee", AdjustmentType::Multiplier, dec!(2), 2),
            rule(2, "quarterly_fee", AdjustmentType::FixedAmount, dec!(100), 1),
        ];
        let result = price(&templates, &fixed_first, &input(MembershipStatus::Member));
        assert_eq!(result.quarterly_fee, dec!(1200));
        assert_eq!(result.applied_rules[0].rule_id, 2);
        assert_eq!(result.applied_rules[1].rule_id, 1);

        // multiplier (priority 1) then fixed (priority 2): 500 * 2 + 100
        let multiplier_first = vec![
            rule(1, "quarterly_fee", AdjustmentType::Multiplier, dec!(2), 1),
            rule(2, "quarterly_fee", AdjustmentType::FixedAmount, dec!(100), 2),
        ];
        let result = price(&templates, &multiplier_first, &input(MembershipStatus::Member));
        assert_eq!(result.quarterly_fee, dec!(1100));
    }

    #[test]
    fn equal_priorities_keep_input_order() {
        let templates = vec![template(1, "Marketplace", true)];
        let rules = vec![
            rule(7, "annual_fee", AdjustmentType::FixedAmount, dec!(400), 5),
            rule(3, "annual_fee", AdjustmentType::Multiplier, dec!(0.5), 5),
        ];
        let result = price(&templates, &rules, &input(MembershipStatus::Member));
        assert_eq!(result.annual_fee, dec!(1000));
        let order: Vec<i64> = result.applied_rules.iter().map(|r| r.rule_id).collect();
        assert_eq!(order, vec![7, 3]);
    }

    #[test]
    fn blanket_member_discount_hits_all_four_fields() {
        let templates = vec![template(1, "Marketplace", true)];
        let mut discount = rule(1, ALL_FEES_TARGET, AdjustmentType::Percentage, dec!(10), 0);
        discount.rule_type = MEMBER_DISCOUNT_RULE.to_string();

        let result = price(&templates, &[discount], &input(MembershipStatus::Member));

        assert_eq!(result.platform_fee_percentage, dec!(13.5));
        assert_eq!(result.quarterly_fee, dec!(450));
        assert_eq!(result.half_yearly_fee, dec!(810));
        assert_eq!(result.annual_fee, dec!(1440));
        assert_eq!(result.applied_rules[0].fields, FeeField::ALL.to_vec());
    }

    #[test]
    fn blanket_member_discount_is_always_a_percentage() {
        let templates = vec![template(1, "Marketplace", true)];
        let mut discount = rule(1, ALL_FEES_TARGET, AdjustmentType::Multiplier, dec!(10), 0);
        discount.rule_type = MEMBER_DISCOUNT_RULE.to_string();

        let result = price(&templates, &[discount], &input(MembershipStatus::Member));
        assert_eq!(result.quarterly_fee, dec!(450));
        assert_eq!(
            result.applied_rules[0].adjustment_type,
            AdjustmentType::Percentage
        );
    }

    #[test]
    fn all_fees_without_member_discount_is_skipped() {
        let templates = vec![template(1, "Marketplace", true)];
        let rules = vec![rule(1, ALL_FEES_TARGET, AdjustmentType::Percentage, dec!(10), 0)];

        let result = price(&templates, &rules, &input(MembershipStatus::Member));
        assert_eq!(result.quarterly_fee, dec!(500));
        assert!(result.applied_rules.is_empty());
    }

    #[test]
    fn unknown_target_field_is_skipped() {
        let templates = vec![template(1, "Marketplace", true)];
        let rules = vec![
            rule(1, "setup_fee", AdjustmentType::FixedAmount, dec!(99), 0),
            rule(2, "annual_fee", AdjustmentType::FixedAmount, dec!(1), 1),
        ];

        let result = price(&templates, &rules, &input(MembershipStatus::Member));
        assert_eq!(result.annual_fee, dec!(1601));
        assert_eq!(result.applied_rules.len(), 1);
    }

    #[test]
    fn inactive_rules_are_ignored() {
        let templates = vec![template(1, "Marketplace", true)];
        let mut inactive = rule(1, "quarterly_fee", AdjustmentType::Percentage, dec!(50), 0);
        inactive.is_active = false;

        let result = price(&templates, &[inactive], &input(MembershipStatus::Member));
        assert_eq!(result.quarterly_fee, dec!(500));
    }

    #[test]
    fn rules_on_different_axes_combine() {
        let templates = vec![template(1, "Marketplace", true)];
        let mut by_country = rule(1, "quarterly_fee", AdjustmentType::Multiplier, dec!(0.5), 1);
        by_country.condition_type = ConditionType::Country;
        by_country.condition_value = "India".to_string();
        let mut by_org_type = rule(2, "quarterly_fee", AdjustmentType::FixedAmount, dec!(-50), 2);
        by_org_type.condition_type = ConditionType::OrganizationType;
        by_org_type.condition_value = "Startup".to_string();

        let result = price(
            &templates,
            &[by_org_type, by_country],
            &input(MembershipStatus::NonMember),
        );
        assert_eq!(result.quarterly_fee, dec!(200));
    }

    #[test]
    fn chained_large_multipliers_fail_instead_of_panicking() {
        let mut big = template(1, "Marketplace", true);
        big.base_quarterly_fee = dec!(999999999999.99);
        let templates = vec![big];
        let rules: Vec<PricingRule> = (1..=3)
            .map(|id| {
                rule(id, "quarterly_fee", AdjustmentType::Multiplier, dec!(9999999999.9999), 0)
            })
            .collect();

        assert_matches!(
            calculate_pricing(&templates, &rules, &input(MembershipStatus::Member)),
            Err(CoreError::Internal(msg)) if msg.contains("quarterly_fee")
        );
    }

    #[test]
    fn missing_template_yields_none() {
        let templates = vec![template(1, "Marketplace", true)];
        let mut request = input(MembershipStatus::Member);
        request.engagement_model = "Aggregator".to_string();

        assert_matches!(calculate_pricing(&templates, &[], &request), Ok(None));
    }

    #[test]
    fn inactive_template_is_never_selected() {
        let templates = vec![template(1, "Marketplace", false)];
        assert_matches!(
            calculate_pricing(&templates, &[], &input(MembershipStatus::Member)),
            Ok(None)
        );
    }

    #[test]
    fn first_active_matching_template_wins() {
        let mut second = template(2, "Marketplace", true);
        second.base_quarterly_fee = dec!(750);
        let templates = vec![
            template(1, "Marketplace", false),
            second,
            template(3, "Marketplace", true),
        ];

        let result = price(&templates, &[], &input(MembershipStatus::Member));
        assert_eq!(result.template_id, 2);
        assert_eq!(result.quarterly_fee, dec!(750));
    }
}
