//! Handlers for the signed-in organization's own profile, membership and
//! pricing, plus the admin organization listing.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use seeker_core::error::CoreError;
use seeker_core::master_data::MasterDataKind;
use seeker_core::membership::{effective_membership_status, membership_expiry, MembershipStatus};
use seeker_core::pricing::PricingInput;
use seeker_core::registration::{validate_profile_update, ProfileUpdateInput};
use seeker_core::types::DbId;
use seeker_db::models::organization::{OrganizationProfile, UpdateOrganization};
use seeker_db::repositories::{MembershipTierRepo, OrganizationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::master_data::{ensure_active_country, ensure_active_lookup};
use crate::handlers::pricing::calculate_for;
use crate::middleware::rbac::{RequireAdmin, RequireSeeker};
use crate::query::EngagementModelParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /organizations/me/membership`.
#[derive(Debug, Deserialize)]
pub struct ActivateMembershipRequest {
    pub tier_id: DbId,
}

async fn load_profile(state: &AppState, id: DbId) -> AppResult<OrganizationProfile> {
    OrganizationRepo::find_profile_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id,
        }))
}

/// GET /api/v1/organizations/me
pub async fn get_me(
    seeker: RequireSeeker,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = load_profile(&state, seeker.organization_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/organizations/me
pub async fn update_me(
    seeker: RequireSeeker,
    State(state): State<AppState>,
    Json(input): Json<ProfileUpdateInput>,
) -> AppResult<impl IntoResponse> {
    let input = validate_profile_update(input)?;

    if let Some(id) = input.organization_type_id {
        ensure_active_lookup(
            &state.pool,
            MasterDataKind::OrganizationTypes,
            id,
            "organization_type_id",
        )
        .await?;
    }
    if let Some(id) = input.entity_type_id {
        ensure_active_lookup(&state.pool, MasterDataKind::EntityTypes, id, "entity_type_id").await?;
    }
    if let Some(id) = input.industry_segment_id {
        ensure_active_lookup(
            &state.pool,
            MasterDataKind::IndustrySegments,
            id,
            "industry_segment_id",
        )
        .await?;
    }
    if let Some(id) = input.country_id {
        ensure_active_country(&state.pool, id, "country_id").await?;
    }

    let update = UpdateOrganization {
        organization_name: input.organization_name,
        organization_type_id: input.organization_type_id,
        entity_type_id: input.entity_type_id,
        industry_segment_id: input.industry_segment_id,
        country_id: input.country_id,
        website: input.website,
        contact_first_name: input.contact_first_name,
        contact_last_name: input.contact_last_name,
        contact_phone: input.contact_phone,
    };
    OrganizationRepo::update(&state.pool, seeker.organization_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: seeker.organization_id,
        }))?;

    tracing::info!(
        organization_id = seeker.organization_id,
        user_id = seeker.user.user_id,
        "Organization profile updated",
    );
    let profile = load_profile(&state, seeker.organization_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/organizations/me/membership
///
/// Start (or restart) a membership on an active tier. The expiry is the
/// tier's duration from now.
pub async fn activate_membership(
    seeker: RequireSeeker,
    State(state): State<AppState>,
    Json(input): Json<ActivateMembershipRequest>,
) -> AppResult<impl IntoResponse> {
    let tier = MembershipTierRepo::find_by_id(&state.pool, input.tier_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MembershipTier",
            id: input.tier_id,
        }))?;
    if !tier.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "tier_id: membership tier {} is not active",
            tier.id
        ))));
    }

    let started_at = chrono::Utc::now();
    let expires_at = membership_expiry(started_at, tier.duration_months)?;

    OrganizationRepo::activate_membership(
        &state.pool,
        seeker.organization_id,
        tier.id,
        started_at,
        expires_at,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Organization",
        id: seeker.organization_id,
    }))?;

    tracing::info!(
        organization_id = seeker.organization_id,
        tier_id = tier.id,
        %expires_at,
        "Membership activated",
    );
    let profile = load_profile(&state, seeker.organization_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/organizations/me/membership
pub async fn cancel_membership(
    seeker: RequireSeeker,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    OrganizationRepo::cancel_membership(&state.pool, seeker.organization_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: seeker.organization_id,
        }))?;

    tracing::info!(organization_id = seeker.organization_id, "Membership cancelled");
    let profile = load_profile(&state, seeker.organization_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/organizations/me/pricing?engagement_model=Marketplace
///
/// Price the signed-in organization using its organization type, country
/// and current membership status.
pub async fn my_pricing(
    seeker: RequireSeeker,
    State(state): State<AppState>,
    Query(params): Query<EngagementModelParams>,
) -> AppResult<impl IntoResponse> {
    let profile = load_profile(&state, seeker.organization_id).await?;
    let stored = MembershipStatus::parse(&profile.membership_status).ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Organization {} has unknown membership status '{}'",
            profile.id, profile.membership_status
        )))
    })?;

    let input = PricingInput {
        engagement_model: params.engagement_model,
        organization_type: profile.organization_type_name,
        membership_status: effective_membership_status(
            stored,
            profile.membership_expires_at,
            chrono::Utc::now(),
        ),
        country: Some(profile.country_name),
    };
    let breakdown = calculate_for(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: breakdown }))
}

/// GET /api/v1/admin/organizations
pub async fn list_organizations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let organizations = OrganizationRepo::list_profiles(&state.pool).await?;
    Ok(Json(DataResponse { data: organizations }))
}
