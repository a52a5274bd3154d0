//! Handlers for master data: the simple lookup tables, countries,
//! currencies, categories and membership tiers.
//!
//! Public endpoints list active rows only. Admin endpoints under
//! `/admin/...` provide full CRUD and accept `?include_inactive=true`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;
use seeker_core::error::CoreError;
use seeker_core::master_data::{
    normalize_country_code, normalize_currency_code, normalize_description, normalize_name,
    validate_membership_tier, MasterDataKind,
};
use seeker_core::types::DbId;
use seeker_db::models::category::{CreateCategory, UpdateCategory};
use seeker_db::models::country::{CreateCountry, UpdateCountry};
use seeker_db::models::currency::{CreateCurrency, UpdateCurrency};
use seeker_db::models::lookup::{CreateLookupItem, UpdateLookupItem};
use seeker_db::models::membership_tier::{CreateMembershipTier, UpdateMembershipTier};
use seeker_db::repositories::{
    CategoryRepo, CountryRepo, CurrencyRepo, LookupRepo, MembershipTierRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{CategoryListParams, IncludeInactiveParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default membership length when a new tier omits `duration_months`.
const DEFAULT_TIER_DURATION_MONTHS: i32 = 12;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn parse_kind(slug: &str) -> AppResult<MasterDataKind> {
    MasterDataKind::from_slug(slug)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown lookup kind '{slug}'")))
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn deleted_or_not_found(deleted: bool, entity: &'static str, id: DbId) -> AppResult<StatusCode> {
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(entity, id))
    }
}

fn normalize_optional_name(name: Option<&str>) -> Result<Option<String>, CoreError> {
    name.map(normalize_name).transpose()
}

/// Fail with a validation error unless `id` names an active row of `kind`.
pub(crate) async fn ensure_active_lookup(
    pool: &PgPool,
    kind: MasterDataKind,
    id: DbId,
    field: &str,
) -> AppResult<()> {
    if LookupRepo::exists_active(pool, kind, id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "{field}: {id} is not an active {}",
            kind.entity_name()
        ))))
    }
}

/// Fail with a validation error unless `id` names an active country.
pub(crate) async fn ensure_active_country(pool: &PgPool, id: DbId, field: &str) -> AppResult<()> {
    match CountryRepo::find_by_id(pool, id).await? {
        Some(country) if country.is_active => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "{field}: {id} is not an active Country"
        )))),
    }
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/v1/lookups/{kind}
pub async fn list_active_lookups(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let items = LookupRepo::list(&state.pool, kind, false).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/countries
pub async fn list_active_countries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let countries = CountryRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: countries }))
}

/// GET /api/v1/currencies
pub async fn list_active_currencies(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let currencies = CurrencyRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: currencies }))
}

/// GET /api/v1/categories?domain_group_id=
pub async fn list_active_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, params.domain_group_id, false).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/membership-tiers
pub async fn list_active_membership_tiers(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tiers = MembershipTierRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: tiers }))
}

// ---------------------------------------------------------------------------
// Admin: lookups
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/lookups/{kind}?include_inactive=false
pub async fn list_lookups(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let items = LookupRepo::list(&state.pool, kind, params.include_inactive).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/lookups/{kind}
pub async fn create_lookup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<CreateLookupItem>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let input = CreateLookupItem {
        name: normalize_name(&input.name)?,
        description: normalize_description(input.description.as_deref())?,
        ..input
    };
    let item = LookupRepo::create(&state.pool, kind, &input).await?;

    tracing::info!(kind = kind.slug(), id = item.id, admin_id = admin.user_id, "Lookup created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/admin/lookups/{kind}/{id}
pub async fn get_lookup(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let item = LookupRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(kind.entity_name(), id))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/admin/lookups/{kind}/{id}
pub async fn update_lookup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateLookupItem>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let input = UpdateLookupItem {
        name: normalize_optional_name(input.name.as_deref())?,
        description: normalize_description(input.description.as_deref())?,
        ..input
    };
    let item = LookupRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or_else(|| not_found(kind.entity_name(), id))?;

    tracing::info!(kind = kind.slug(), id, admin_id = admin.user_id, "Lookup updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/lookups/{kind}/{id}
///
/// Rows still referenced elsewhere cannot be deleted (409); deactivate them instead.
pub async fn delete_lookup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    let deleted = LookupRepo::delete(&state.pool, kind, id).await?;
    if deleted {
        tracing::info!(kind = kind.slug(), id, admin_id = admin.user_id, "Lookup deleted");
    }
    deleted_or_not_found(deleted, kind.entity_name(), id)
}

// ---------------------------------------------------------------------------
// Admin: countries
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/countries?include_inactive=false
pub async fn list_countries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let countries = CountryRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: countries }))
}

/// POST /api/v1/admin/countries
pub async fn create_country(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCountry>,
) -> AppResult<impl IntoResponse> {
    let input = CreateCountry {
        code: normalize_country_code(&input.code)?,
        name: normalize_name(&input.name)?,
        ..input
    };
    let country = CountryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = country.id,
        code = %country.code,
        admin_id = admin.user_id,
        "Country created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: country })))
}

/// GET /api/v1/admin/countries/{id}
pub async fn get_country(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let country = CountryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Country", id))?;
    Ok(Json(DataResponse { data: country }))
}

/// PUT /api/v1/admin/countries/{id}
pub async fn update_country(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCountry>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateCountry {
        code: input.code.as_deref().map(normalize_country_code).transpose()?,
        name: normalize_optional_name(input.name.as_deref())?,
        ..input
    };
    let country = CountryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Country", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Country updated");
    Ok(Json(DataResponse { data: country }))
}

/// DELETE /api/v1/admin/countries/{id}
pub async fn delete_country(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CountryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, admin_id = admin.user_id, "Country deleted");
    }
    deleted_or_not_found(deleted, "Country", id)
}

// ---------------------------------------------------------------------------
// Admin: currencies
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/currencies?include_inactive=false
pub async fn list_currencies(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let currencies = CurrencyRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: currencies }))
}

/// POST /api/v1/admin/currencies
pub async fn create_currency(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCurrency>,
) -> AppResult<impl IntoResponse> {
    let input = CreateCurrency {
        code: normalize_currency_code(&input.code)?,
        name: normalize_name(&input.name)?,
        ..input
    };
    let currency = CurrencyRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = currency.id,
        code = %currency.code,
        admin_id = admin.user_id,
        "Currency created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: currency })))
}

/// GET /api/v1/admin/currencies/{id}
pub async fn get_currency(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let currency = CurrencyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Currency", id))?;
    Ok(Json(DataResponse { data: currency }))
}

/// PUT /api/v1/admin/currencies/{id}
pub async fn update_currency(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCurrency>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateCurrency {
        code: input.code.as_deref().map(normalize_currency_code).transpose()?,
        name: normalize_optional_name(input.name.as_deref())?,
        ..input
    };
    let currency = CurrencyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Currency", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Currency updated");
    Ok(Json(DataResponse { data: currency }))
}

/// DELETE /api/v1/admin/currencies/{id}
pub async fn delete_currency(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CurrencyRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, admin_id = admin.user_id, "Currency deleted");
    }
    deleted_or_not_found(deleted, "Currency", id)
}

// ---------------------------------------------------------------------------
// Admin: categories
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/categories?domain_group_id=&include_inactive=false
pub async fn list_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let categories =
        CategoryRepo::list(&state.pool, params.domain_group_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    ensure_active_lookup(
        &state.pool,
        MasterDataKind::DomainGroups,
        input.domain_group_id,
        "domain_group_id",
    )
    .await?;
    let input = CreateCategory {
        name: normalize_name(&input.name)?,
        description: normalize_description(input.description.as_deref())?,
        ..input
    };
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = category.id,
        domain_group_id = category.domain_group_id,
        admin_id = admin.user_id,
        "Category created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(group_id) = input.domain_group_id {
        ensure_active_lookup(
            &state.pool,
            MasterDataKind::DomainGroups,
            group_id,
            "domain_group_id",
        )
        .await?;
    }
    let input = UpdateCategory {
        name: normalize_optional_name(input.name.as_deref())?,
        description: normalize_description(input.description.as_deref())?,
        ..input
    };
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Category", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, admin_id = admin.user_id, "Category deleted");
    }
    deleted_or_not_found(deleted, "Category", id)
}

// ---------------------------------------------------------------------------
// Admin: membership tiers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/membership-tiers?include_inactive=false
pub async fn list_membership_tiers(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let tiers = MembershipTierRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: tiers }))
}

/// POST /api/v1/admin/membership-tiers
pub async fn create_membership_tier(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMembershipTier>,
) -> AppResult<impl IntoResponse> {
    validate_membership_tier(
        input.annual_fee,
        input.duration_months.unwrap_or(DEFAULT_TIER_DURATION_MONTHS),
    )?;
    let input = CreateMembershipTier {
        name: normalize_name(&input.name)?,
        description: normalize_description(input.description.as_deref())?,
        currency_code: normalize_currency_code(&input.currency_code)?,
        ..input
    };
    let tier = MembershipTierRepo::create(&state.pool, &input).await?;

    tracing::info!(id = tier.id, admin_id = admin.user_id, "Membership tier created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tier })))
}

/// GET /api/v1/admin/membership-tiers/{id}
pub async fn get_membership_tier(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tier = MembershipTierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("MembershipTier", id))?;
    Ok(Json(DataResponse { data: tier }))
}

/// PUT /api/v1/admin/membership-tiers/{id}
///
/// Fee and duration are validated against the merged row.
pub async fn update_membership_tier(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMembershipTier>,
) -> AppResult<impl IntoResponse> {
    let existing = MembershipTierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("MembershipTier", id))?;
    validate_membership_tier(
        input.annual_fee.unwrap_or(existing.annual_fee),
        input.duration_months.unwrap_or(existing.duration_months),
    )?;

    let input = UpdateMembershipTier {
        name: normalize_optional_name(input.name.as_deref())?,
        description: normalize_description(input.description.as_deref())?,
        currency_code: input
            .currency_code
            .as_deref()
            .map(normalize_currency_code)
            .transpose()?,
        ..input
    };
    let tier = MembershipTierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("MembershipTier", id))?;

    tracing::info!(id, admin_id = admin.user_id, "Membership tier updated");
    Ok(Json(DataResponse { data: tier }))
}

/// DELETE /api/v1/admin/membership-tiers/{id}
pub async fn delete_membership_tier(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MembershipTierRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, admin_id = admin.user_id, "Membership tier deleted");
    }
    deleted_or_not_found(deleted, "MembershipTier", id)
}
