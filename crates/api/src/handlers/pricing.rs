//! Handlers for pricing administration and fee calculation.
//!
//! Templates, rules and overrides are validated on write against the merged
//! row, so a partial update cannot leave an invalid definition behind.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;
use seeker_core::error::CoreError;
use seeker_core::master_data::{normalize_description, MasterDataKind};
use seeker_core::pricing::{
    validate_override_definition, validate_rule_definition, validate_template_definition,
    FeeBreakdown, PricingInput, RuleDefinition, TemplateDefinition,
};
use seeker_core::types::DbId;
use seeker_db::catalog::PricingCatalog;
use seeker_db::models::pricing::{
    CreatePricingOverride, CreatePricingRule, CreatePricingTemplate, UpdatePricingOverride,
    UpdatePricingRule, UpdatePricingTemplate,
};
use seeker_db::repositories::{PricingOverrideRepo, PricingRuleRepo, PricingTemplateRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::master_data::{ensure_active_country, ensure_active_lookup};
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// POST /api/v1/pricing/calculate
///
/// Responds with `{"data": null}` when no active template serves the
/// requested engagement model.
pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<PricingInput>,
) -> AppResult<impl IntoResponse> {
    let breakdown = calculate_for(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: breakdown }))
}

/// Load the catalog and price `input` against it.
pub(crate) async fn calculate_for(
    pool: &PgPool,
    input: &PricingInput,
) -> AppResult<Option<FeeBreakdown>> {
    let catalog = PricingCatalog::load(pool).await;
    catalog.ensure_calculable()?;

    let breakdown = catalog.calculate(input)?;
    tracing::debug!(
        engagement_model = %input.engagement_model,
        organization_type = %input.organization_type,
        membership_status = %input.membership_status,
        found = breakdown.is_some(),
        "Pricing calculated",
    );
    Ok(breakdown)
}

/// GET /api/v1/admin/pricing/catalog
///
/// Active templates, rules and overrides, plus any per-list load errors.
pub async fn catalog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let catalog = PricingCatalog::load(&state.pool).await;
    Ok(Json(DataResponse { data: catalog }))
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/pricing/templates?include_inactive=false
pub async fn list_templates(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let templates = PricingTemplateRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/admin/pricing/templates
pub async fn create_template(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePricingTemplate>,
) -> AppResult<impl IntoResponse> {
    let currency_code = validate_template_definition(&TemplateDefinition {
        template_name: &input.template_name,
        engagement_model: &input.engagement_model,
        template_type: &input.template_type,
        base_platform_fee_percentage: input.base_platform_fee_percentage,
        base_quarterly_fee: input.base_quarterly_fee,
        base_half_yearly_fee: input.base_half_yearly_fee,
        base_annual_fee: input.base_annual_fee,
        currency_code: &input.currency_code,
    })?;
    let input = CreatePricingTemplate {
        template_name: input.template_name.trim().to_string(),
        engagement_model: input.engagement_model.trim().to_string(),
        currency_code,
        ..input
    };
    let template = PricingTemplateRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = template.id,
        engagement_model = %template.engagement_model,
        admin_id = admin.user_id,
        "Pricing template created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/admin/pricing/templates/{id}
pub async fn get_template(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = PricingTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingTemplate", id))?;
    Ok(Json(DataResponse { data: template }))
}

/// PUT /api/v1/admin/pricing/templates/{id}
pub async fn update_template(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePricingTemplate>,
) -> AppResult<impl IntoResponse> {
    let existing = PricingTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingTemplate", id))?;

    let currency_code = validate_template_definition(&TemplateDefinition {
        template_name: input.template_name.as_deref().unwrap_or(&existing.template_name),
        engagement_model: input
            .engagement_model
            .as_deref()
            .unwrap_or(&existing.engagement_model),
        template_type: input.template_type.as_deref().unwrap_or(&existing.template_type),
        base_platform_fee_percentage: input
            .base_platform_fee_percentage
            .unwrap_or(existing.base_platform_fee_percentage),
        base_quarterly_fee: input.base_quarterly_fee.unwrap_or(existing.base_quarterly_fee),
        base_half_yearly_fee: input
            .base_half_yearly_fee
            .unwrap_or(existing.base_half_yearly_fee),
        base_annual_fee: input.base_annual_fee.unwrap_or(existing.base_annual_fee),
        currency_code: input.currency_code.as_deref().unwrap_or(&existing.currency_code),
    })?;

    let input = UpdatePricingTemplate {
        template_name: input.template_name.map(|v| v.trim().to_string()),
        engagement_model: input.engagement_model.map(|v| v.trim().to_string()),
        currency_code: Some(currency_code),
        ..input
    };
    let template = PricingTemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PricingTemplate", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Pricing template updated");
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/admin/pricing/templates/{id}
pub async fn delete_template(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PricingTemplateRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Pricing template deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("PricingTemplate", id))
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/pricing/rules?include_inactive=false
pub async fn list_rules(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let rules = PricingRuleRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: rules }))
}

/// POST /api/v1/admin/pricing/rules
pub async fn create_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePricingRule>,
) -> AppResult<impl IntoResponse> {
    validate_rule_definition(&RuleDefinition {
        rule_name: &input.rule_name,
        rule_type: &input.rule_type,
        target_field: &input.target_field,
        condition_type: &input.condition_type,
        condition_value: &input.condition_value,
        adjustment_type: &input.adjustment_type,
        adjustment_value: input.adjustment_value,
        priority: input.priority.unwrap_or(0),
    })?;
    let input = CreatePricingRule {
        rule_name: input.rule_name.trim().to_string(),
        rule_type: input.rule_type.trim().to_string(),
        condition_value: input.condition_value.trim().to_string(),
        ..input
    };
    let rule = PricingRuleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = rule.id,
        rule_type = %rule.rule_type,
        priority = rule.priority,
        admin_id = admin.user_id,
        "Pricing rule created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// GET /api/v1/admin/pricing/rules/{id}
pub async fn get_rule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = PricingRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingRule", id))?;
    Ok(Json(DataResponse { data: rule }))
}

/// PUT /api/v1/admin/pricing/rules/{id}
pub async fn update_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePricingRule>,
) -> AppResult<impl IntoResponse> {
    let existing = PricingRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingRule", id))?;

    validate_rule_definition(&RuleDefinition {
        rule_name: input.rule_name.as_deref().unwrap_or(&existing.rule_name),
        rule_type: input.rule_type.as_deref().unwrap_or(&existing.rule_type),
        target_field: input.target_field.as_deref().unwrap_or(&existing.target_field),
        condition_type: input
            .condition_type
            .as_deref()
            .unwrap_or(&existing.condition_type),
        condition_value: input
            .condition_value
            .as_deref()
            .unwrap_or(&existing.condition_value),
        adjustment_type: input
            .adjustment_type
            .as_deref()
            .unwrap_or(&existing.adjustment_type),
        adjustment_value: input.adjustment_value.unwrap_or(existing.adjustment_value),
        priority: input.priority.unwrap_or(existing.priority),
    })?;

    let input = UpdatePricingRule {
        rule_name: input.rule_name.map(|v| v.trim().to_string()),
        rule_type: input.rule_type.map(|v| v.trim().to_string()),
        condition_value: input.condition_value.map(|v| v.trim().to_string()),
        ..input
    };
    let rule = PricingRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PricingRule", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Pricing rule updated");
    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/admin/pricing/rules/{id}
pub async fn delete_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PricingRuleRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Pricing rule deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("PricingRule", id))
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Every dimension an override names must be an active master-data row.
async fn ensure_override_dimensions(
    pool: &PgPool,
    country_id: Option<DbId>,
    organization_type_id: Option<DbId>,
    entity_type_id: Option<DbId>,
    engagement_model_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = country_id {
        ensure_active_country(pool, id, "country_id").await?;
    }
    for (kind, id, field) in [
        (MasterDataKind::OrganizationTypes, organization_type_id, "organization_type_id"),
        (MasterDataKind::EntityTypes, entity_type_id, "entity_type_id"),
        (MasterDataKind::EngagementModels, engagement_model_id, "engagement_model_id"),
    ] {
        if let Some(id) = id {
            ensure_active_lookup(pool, kind, id, field).await?;
        }
    }
    Ok(())
}

/// GET /api/v1/admin/pricing/overrides?include_inactive=false
pub async fn list_overrides(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let overrides = PricingOverrideRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: overrides }))
}

/// POST /api/v1/admin/pricing/overrides
///
/// Overrides are stored for administration; fee calculation does not apply them.
pub async fn create_override(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePricingOverride>,
) -> AppResult<impl IntoResponse> {
    validate_override_definition(
        &input.target_field,
        input.override_value,
        input.membership_status.as_deref(),
    )?;
    ensure_override_dimensions(
        &state.pool,
        input.country_id,
        input.organization_type_id,
        input.entity_type_id,
        input.engagement_model_id,
    )
    .await?;

    let input = CreatePricingOverride {
        notes: normalize_description(input.notes.as_deref())?,
        ..input
    };
    let pricing_override = PricingOverrideRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = pricing_override.id,
        target_field = %pricing_override.target_field,
        admin_id = admin.user_id,
        "Pricing override created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: pricing_override })))
}

/// GET /api/v1/admin/pricing/overrides/{id}
pub async fn get_override(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let pricing_override = PricingOverrideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingOverride", id))?;
    Ok(Json(DataResponse { data: pricing_override }))
}

/// PUT /api/v1/admin/pricing/overrides/{id}
pub async fn update_override(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePricingOverride>,
) -> AppResult<impl IntoResponse> {
    let existing = PricingOverrideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PricingOverride", id))?;

    validate_override_definition(
        input.target_field.as_deref().unwrap_or(&existing.target_field),
        input.override_value.unwrap_or(existing.override_value),
        input
            .membership_status
            .as_deref()
            .or(existing.membership_status.as_deref()),
    )?;
    ensure_override_dimensions(
        &state.pool,
        input.country_id,
        input.organization_type_id,
        input.entity_type_id,
        input.engagement_model_id,
    )
    .await?;

    let input = UpdatePricingOverride {
        notes: normalize_description(input.notes.as_deref())?,
        ..input
    };
    let pricing_override = PricingOverrideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PricingOverride", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Pricing override updated");
    Ok(Json(DataResponse { data: pricing_override }))
}

/// DELETE /api/v1/admin/pricing/overrides/{id}
pub async fn delete_override(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PricingOverrideRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Pricing override deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("PricingOverride", id))
    }
}
