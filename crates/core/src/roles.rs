//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_users_and_sessions.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SEEKER: &str = "seeker";
