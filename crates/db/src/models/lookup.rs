//! Shared row shape for the simple master-data lookup tables
//! (organization types, entity types, industry segments, domain groups,
//! reward types, engagement models).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::types::{DbId, Timestamp};

/// A row from any [`MasterDataKind`](seeker_core::master_data::MasterDataKind) table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LookupItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lookup row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLookupItem {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a lookup row. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLookupItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
