//! Integration tests for the pricing repositories and catalog.

use rust_decimal_macros::dec;
use sqlx::PgPool;
use seeker_core::membership::MembershipStatus;
use seeker_core::pricing::PricingInput;
use seeker_db::catalog::PricingCatalog;
use seeker_db::models::pricing::{
    CreatePricingOverride, CreatePricingRule, CreatePricingTemplate, UpdatePricingRule,
    UpdatePricingTemplate,
};
use seeker_db::repositories::{PricingOverrideRepo, PricingRuleRepo, PricingTemplateRepo};

fn new_template(name: &str, engagement_model: &str) -> CreatePricingTemplate {
    CreatePricingTemplate {
        template_name: name.to_string(),
        engagement_model: engagement_model.to_string(),
        template_type: "marketplace".into(),
        base_platform_fee_percentage: dec!(15),
        base_quarterly_fee: dec!(500),
        base_half_yearly_fee: dec!(900),
        base_annual_fee: dec!(1600),
        currency_code: "USD".into(),
        internal_pricing: None,
        is_active: None,
    }
}

fn new_rule(name: &str, target_field: &str, priority: i32) -> CreatePricingRule {
    CreatePricingRule {
        rule_name: name.to_string(),
        rule_type: "org_type_discount".into(),
        target_field: target_field.to_string(),
        condition_type: "organization_type".into(),
        condition_value: "Startup".into(),
        adjustment_type: "percentage".into(),
        adjustment_value: dec!(20),
        priority: Some(priority),
        is_active: None,
    }
}

fn startup_input(membership_status: MembershipStatus) -> PricingInput {
    PricingInput {
        engagement_model: "Marketplace".into(),
        organization_type: "Startup".into(),
        membership_status,
        country: Some("India".into()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_template_crud(pool: PgPool) {
    let input = new_template("Marketplace standard", "Marketplace");
    let created = PricingTemplateRepo::create(&pool, &input).await.unwrap();
    assert!(created.is_active);
    assert_eq!(created.internal_pricing, serde_json::json!({}));
    assert_eq!(created.base_quarterly_fee, dec!(500));

    let updated = PricingTemplateRepo::update(
        &pool,
        created.id,
        &UpdatePricingTemplate {
            template_name: None,
            engagement_model: None,
            template_type: None,
            base_platform_fee_percentage: None,
            base_quarterly_fee: Some(dec!(450)),
            base_half_yearly_fee: None,
            base_annual_fee: None,
            currency_code: None,
            internal_pricing: Some(serde_json::json!({ "margin": 0.3 })),
            is_active: Some(false),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.base_quarterly_fee, dec!(450));
    assert_eq!(updated.base_annual_fee, dec!(1600));
    assert!(!updated.is_active);

    assert!(PricingTemplateRepo::list(&pool, false).await.unwrap().is_empty());
    assert_eq!(PricingTemplateRepo::list(&pool, true).await.unwrap().len(), 1);

    assert!(PricingTemplateRepo::delete(&pool, created.id).await.unwrap());
    assert!(PricingTemplateRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rules_list_in_priority_order(pool: PgPool) {
    PricingRuleRepo::create(&pool, &new_rule("late", "annual_fee", 5)).await.unwrap();
    PricingRuleRepo::create(&pool, &new_rule("early", "annual_fee", 1)).await.unwrap();
    let middle = PricingRuleRepo::create(&pool, &new_rule("middle", "annual_fee", 3))
        .await
        .unwrap();

    let names: Vec<String> = PricingRuleRepo::list(&pool, false)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.rule_name)
        .collect();
    assert_eq!(names, ["early", "middle", "late"]);

    let updated = PricingRuleRepo::update(
        &pool,
        middle.id,
        &UpdatePricingRule {
            rule_name: None,
            rule_type: None,
            target_field: None,
            condition_type: None,
            condition_value: None,
            adjustment_type: None,
            adjustment_value: None,
            priority: Some(0),
            is_active: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.priority, 0);
    assert_eq!(
        PricingRuleRepo::list(&pool, false).await.unwrap()[0].rule_name,
        "middle"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_priority_is_rejected_by_schema(pool: PgPool) {
    let result = PricingRuleRepo::create(&pool, &new_rule("negative", "annual_fee", -1)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_loads_active_rows_and_calculates(pool: PgPool) {
    PricingTemplateRepo::create(&pool, &new_template("Marketplace standard", "Marketplace"))
        .await
        .unwrap();
    PricingTemplateRepo::create(&pool, &new_template("PaaS standard", "Platform as a Service"))
        .await
        .unwrap();
    PricingRuleRepo::create(&pool, &new_rule("Startup quarterly", "quarterly_fee", 1))
        .await
        .unwrap();
    PricingRuleRepo::create(
        &pool,
        &CreatePricingRule {
            rule_type: "member_discount".into(),
            target_field: "all_fees".into(),
            condition_type: "membership_status".into(),
            condition_value: "Member".into(),
            adjustment_value: dec!(10),
            ..new_rule("Member discount", "all_fees", 2)
        },
    )
    .await
    .unwrap();
    PricingRuleRepo::create(
        &pool,
        &CreatePricingRule {
            is_active: Some(false),
            ..new_rule("Retired", "annual_fee", 0)
        },
    )
    .await
    .unwrap();
    PricingOverrideRepo::create(
        &pool,
        &CreatePricingOverride {
            country_id: None,
            organization_type_id: None,
            entity_type_id: None,
            engagement_model_id: None,
            membership_status: Some("Member".into()),
            target_field: "annual_fee".into(),
            override_value: dec!(1),
            notes: Some("Never read by the calculator".into()),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let catalog = PricingCatalog::load(&pool).await;
    assert!(catalog.errors.is_empty());
    assert!(catalog.ensure_calculable().is_ok());
    assert_eq!(catalog.templates.len(), 2);
    assert_eq!(catalog.rules.len(), 2);
    assert_eq!(catalog.overrides.len(), 1);

    let non_member = catalog
        .calculate(&startup_input(MembershipStatus::NonMember))
        .unwrap()
        .unwrap();
    assert_eq!(non_member.quarterly_fee, dec!(400));
    assert_eq!(non_member.annual_fee, dec!(1600));

    let member = catalog
        .calculate(&startup_input(MembershipStatus::Member))
        .unwrap()
        .unwrap();
    assert_eq!(member.quarterly_fee, dec!(360));
    assert_eq!(member.half_yearly_fee, dec!(810));
    assert_eq!(member.annual_fee, dec!(1440));
    assert_eq!(member.platform_fee_percentage, dec!(13.5));

    let mut aggregator = startup_input(MembershipStatus::Member);
    aggregator.engagement_model = "Aggregator".into();
    assert!(catalog.calculate(&aggregator).unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_override_dimensions_reference_master_data(pool: PgPool) {
    let result = PricingOverrideRepo::create(
        &pool,
        &CreatePricingOverride {
            country_id: Some(999_999),
            organization_type_id: None,
            entity_type_id: None,
            engagement_model_id: None,
            membership_status: None,
            target_field: "annual_fee".into(),
            override_value: dec!(100),
            notes: None,
            is_active: None,
        },
    )
    .await;
    assert!(result.is_err());
}
