//! Membership tier model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::types::{DbId, Timestamp};

/// A row from the `membership_tiers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MembershipTier {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub annual_fee: Decimal,
    pub currency_code: String,
    pub duration_months: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipTier {
    pub name: String,
    pub description: Option<String>,
    pub annual_fee: Decimal,
    pub currency_code: String,
    pub duration_months: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMembershipTier {
    pub name: Option<String>,
    pub description: Option<String>,
    pub annual_fee: Option<Decimal>,
    pub currency_code: Option<String>,
    pub duration_months: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
