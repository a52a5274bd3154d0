//! Repository for the `organizations` table.

use sqlx::PgPool;
use seeker_core::membership::MembershipStatus;
use seeker_core::types::{DbId, Timestamp};

use crate::models::organization::{
    CreateOrganization, Organization, OrganizationProfile, UpdateOrganization,
};
use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organization_name, organization_type_id, entity_type_id, \
                       industry_segment_id, country_id, website, contact_first_name, \
                       contact_last_name, contact_email, contact_phone, membership_status, \
                       membership_tier_id, membership_started_at, membership_expires_at, \
                       created_at, updated_at";

/// Profile projection: the organization plus its master-data display names.
const PROFILE_SELECT: &str = "SELECT o.id, o.organization_name, \
        o.organization_type_id, ot.name AS organization_type_name, \
        o.entity_type_id, et.name AS entity_type_name, \
        o.industry_segment_id, iseg.name AS industry_segment_name, \
        o.country_id, c.name AS country_name, c.code AS country_code, \
        o.website, o.contact_first_name, o.contact_last_name, o.contact_email, \
        o.contact_phone, o.membership_status, \
        o.membership_tier_id, mt.name AS membership_tier_name, \
        o.membership_started_at, o.membership_expires_at, o.created_at, o.updated_at \
    FROM organizations o \
    JOIN organization_types ot ON ot.id = o.organization_type_id \
    JOIN entity_types et ON et.id = o.entity_type_id \
    LEFT JOIN industry_segments iseg ON iseg.id = o.industry_segment_id \
    JOIN countries c ON c.id = o.country_id \
    LEFT JOIN membership_tiers mt ON mt.id = o.membership_tier_id";

/// Provides persistence for registered organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert an organization and its primary user in one transaction.
    ///
    /// Either both rows are committed or neither is.
    pub async fn create_with_user(
        pool: &PgPool,
        input: &CreateOrganization,
        username: &str,
        password_hash: &str,
        role_id: DbId,
    ) -> Result<(Organization, User), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO organizations \
                (organization_name, organization_type_id, entity_type_id, industry_segment_id, \
                 country_id, website, contact_first_name, contact_last_name, contact_email, \
                 contact_phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let organization = sqlx::query_as::<_, Organization>(&query)
            .bind(&input.organization_name)
            .bind(input.organization_type_id)
            .bind(input.entity_type_id)
            .bind(input.industry_segment_id)
            .bind(input.country_id)
            .bind(&input.website)
            .bind(&input.contact_first_name)
            .bind(&input.contact_last_name)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO users (username, email, password_hash, role_id, organization_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            super::user_repo::COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(&input.contact_email)
            .bind(password_hash)
            .bind(role_id)
            .bind(organization.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((organization, user))
    }

    /// Find an organization together with its reference-data names.
    pub async fn find_profile_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrganizationProfile>, sqlx::Error> {
        let query = format!("{PROFILE_SELECT} WHERE o.id = $1");
        sqlx::query_as::<_, OrganizationProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all organization profiles, most recently registered first.
    pub async fn list_profiles(pool: &PgPool) -> Result<Vec<OrganizationProfile>, sqlx::Error> {
        let query = format!("{PROFILE_SELECT} ORDER BY o.created_at DESC, o.id DESC");
        sqlx::query_as::<_, OrganizationProfile>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                organization_name = COALESCE($2, organization_name),
                organization_type_id = COALESCE($3, organization_type_id),
                entity_type_id = COALESCE($4, entity_type_id),
                industry_segment_id = COALESCE($5, industry_segment_id),
                country_id = COALESCE($6, country_id),
                website = COALESCE($7, website),
                contact_first_name = COALESCE($8, contact_first_name),
                contact_last_name = COALESCE($9, contact_last_name),
                contact_phone = COALESCE($10, contact_phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(&input.organization_name)
            .bind(input.organization_type_id)
            .bind(input.entity_type_id)
            .bind(input.industry_segment_id)
            .bind(input.country_id)
            .bind(&input.website)
            .bind(&input.contact_first_name)
            .bind(&input.contact_last_name)
            .bind(&input.contact_phone)
            .fetch_optional(pool)
            .await
    }

    /// Mark the organization a member of `tier_id` for the given period.
    pub async fn activate_membership(
        pool: &PgPool,
        id: DbId,
        tier_id: DbId,
        started_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                membership_status = $2,
                membership_tier_id = $3,
                membership_started_at = $4,
                membership_expires_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(MembershipStatus::Member.as_str())
            .bind(tier_id)
            .bind(started_at)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Revert the organization to `Non-Member`, clearing tier and dates.
    pub async fn cancel_membership(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                membership_status = $2,
                membership_tier_id = NULL,
                membership_started_at = NULL,
                membership_expires_at = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(MembershipStatus::NonMember.as_str())
            .fetch_optional(pool)
            .await
    }
}
