//! Shared query parameter types for API handlers.

use serde::Deserialize;
use seeker_core::types::DbId;

/// Query parameters for admin list endpoints (`?include_inactive=true`).
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?domain_group_id=&include_inactive=` for category listings.
#[derive(Debug, Deserialize)]
pub struct CategoryListParams {
    pub domain_group_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?engagement_model=` for an organization's own price quote.
#[derive(Debug, Deserialize)]
pub struct EngagementModelParams {
    pub engagement_model: String,
}
