//! Category model and DTOs. Categories are grouped under a domain group.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub domain_group_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub domain_group_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a category. Moving it to another domain group is allowed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub domain_group_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
