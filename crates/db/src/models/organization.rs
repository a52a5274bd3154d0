//! Solution Seeking Organization model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::error::CoreError;
use seeker_core::membership::MembershipStatus;
use seeker_core::types::{DbId, Timestamp};

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub organization_name: String,
    pub organization_type_id: DbId,
    pub entity_type_id: DbId,
    pub industry_segment_id: Option<DbId>,
    pub country_id: DbId,
    pub website: Option<String>,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub membership_status: String,
    pub membership_tier_id: Option<DbId>,
    pub membership_started_at: Option<Timestamp>,
    pub membership_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Organization {
    /// Stored membership status.
    ///
    /// The column is CHECK-constrained, so a parse failure means the schema
    /// and this build disagree.
    pub fn stored_membership_status(&self) -> Result<MembershipStatus, CoreError> {
        MembershipStatus::parse(&self.membership_status).ok_or_else(|| {
            CoreError::Internal(format!(
                "Organization {} has unknown membership status '{}'",
                self.id, self.membership_status
            ))
        })
    }
}

/// An organization joined with the display names of its master-data references.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationProfile {
    pub id: DbId,
    pub organization_name: String,
    pub organization_type_id: DbId,
    pub organization_type_name: String,
    pub entity_type_id: DbId,
    pub entity_type_name: String,
    pub industry_segment_id: Option<DbId>,
    pub industry_segment_name: Option<String>,
    pub country_id: DbId,
    pub country_name: String,
    pub country_code: String,
    pub website: Option<String>,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub membership_status: String,
    pub membership_tier_id: Option<DbId>,
    pub membership_tier_name: Option<String>,
    pub membership_started_at: Option<Timestamp>,
    pub membership_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an organization during registration.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub organization_name: String,
    pub organization_type_id: DbId,
    pub entity_type_id: DbId,
    pub industry_segment_id: Option<DbId>,
    pub country_id: DbId,
    pub website: Option<String>,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// Profile fields an organization may edit itself. Membership is changed
/// through the dedicated membership operations, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganization {
    pub organization_name: Option<String>,
    pub organization_type_id: Option<DbId>,
    pub entity_type_id: Option<DbId>,
    pub industry_segment_id: Option<DbId>,
    pub country_id: Option<DbId>,
    pub website: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    pub contact_phone: Option<String>,
}
