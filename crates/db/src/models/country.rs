//! Country model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seeker_core::types::{DbId, Timestamp};

/// A row from the `countries` table. `code` is ISO 3166-1 alpha-2.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub phone_code: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a country.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCountry {
    pub code: String,
    pub name: String,
    pub phone_code: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a country. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCountry {
    pub code: Option<String>,
    pub name: Option<String>,
    pub phone_code: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
