//! Handler for `POST /registrations`: self-service onboarding of a
//! Solution Seeking Organization and its primary user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use seeker_core::error::CoreError;
use seeker_core::master_data::MasterDataKind;
use seeker_core::registration::{validate_registration, RegistrationInput};
use seeker_core::roles::ROLE_SEEKER;
use seeker_db::models::organization::CreateOrganization;
use seeker_db::repositories::{OrganizationRepo, RoleRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::create_auth_response;
use crate::handlers::master_data::{ensure_active_country, ensure_active_lookup};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations
///
/// Create the organization and its `seeker` user in one transaction and
/// sign the user in. Duplicate username or e-mail yields 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> AppResult<impl IntoResponse> {
    let input = validate_registration(input)?;

    ensure_active_lookup(
        &state.pool,
        MasterDataKind::OrganizationTypes,
        input.organization_type_id,
        "organization_type_id",
    )
    .await?;
    ensure_active_lookup(
        &state.pool,
        MasterDataKind::EntityTypes,
        input.entity_type_id,
        "entity_type_id",
    )
    .await?;
    if let Some(segment_id) = input.industry_segment_id {
        ensure_active_lookup(
            &state.pool,
            MasterDataKind::IndustrySegments,
            segment_id,
            "industry_segment_id",
        )
        .await?;
    }
    ensure_active_country(&state.pool, input.country_id, "country_id").await?;

    let role = RoleRepo::find_by_name(&state.pool, ROLE_SEEKER)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Internal("Seeker role is not seeded".into())))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let organization = CreateOrganization {
        organization_name: input.organization_name,
        organization_type_id: input.organization_type_id,
        entity_type_id: input.entity_type_id,
        industry_segment_id: input.industry_segment_id,
        country_id: input.country_id,
        website: input.website,
        contact_first_name: input.contact_first_name,
        contact_last_name: input.contact_last_name,
        contact_email: input.contact_email,
        contact_phone: input.contact_phone,
    };

    let (organization, user) = OrganizationRepo::create_with_user(
        &state.pool,
        &organization,
        &input.username,
        &password_hash,
        role.id,
    )
    .await?;

    tracing::info!(
        organization_id = organization.id,
        user_id = user.id,
        "Organization registered",
    );

    let response = create_auth_response(&state, &user, &role.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}
