//! Route definitions for organizations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::organizations;
use crate::state::AppState;

/// Routes mounted at `/organizations` (seeker role required).
///
/// ```text
/// GET, PUT        /me               -> get_me, update_me
/// POST, DELETE    /me/membership    -> activate_membership, cancel_membership
/// GET             /me/pricing       -> my_pricing (?engagement_model=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(organizations::get_me).put(organizations::update_me),
        )
        .route(
            "/me/membership",
            post(organizations::activate_membership).delete(organizations::cancel_membership),
        )
        .route("/me/pricing", get(organizations::my_pricing))
}

/// Admin routes mounted at `/admin/organizations`.
///
/// ```text
/// GET /    -> list_organizations
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(organizations::list_organizations))
}
