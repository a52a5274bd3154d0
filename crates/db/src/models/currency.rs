//! Currency model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::types::{DbId, Timestamp};

/// A row from the `currencies` table. `code` is ISO 4217.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Currency {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCurrency {
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCurrency {
    pub code: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
