//! Route definitions for pricing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pricing;
use crate::state::AppState;

/// Public routes mounted at `/pricing`.
///
/// ```text
/// POST /calculate    -> calculate
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/calculate", post(pricing::calculate))
}

/// Admin routes mounted at `/admin/pricing`.
///
/// ```text
/// GET                 /catalog
/// GET, POST           /templates
/// GET, PUT, DELETE    /templates/{id}
/// GET, POST           /rules
/// GET, PUT, DELETE    /rules/{id}
/// GET, POST           /overrides
/// GET, PUT, DELETE    /overrides/{id}
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(pricing::catalog))
        .route(
            "/templates",
            get(pricing::list_templates).post(pricing::create_template),
        )
        .route(
            "/templates/{id}",
            get(pricing::get_template)
                .put(pricing::update_template)
                .delete(pricing::delete_template),
        )
        .route("/rules", get(pricing::list_rules).post(pricing::create_rule))
        .route(
            "/rules/{id}",
            get(pricing::get_rule)
                .put(pricing::update_rule)
                .delete(pricing::delete_rule),
        )
        .route(
            "/overrides",
            get(pricing::list_overrides).post(pricing::create_override),
        )
        .route(
            "/overrides/{id}",
            get(pricing::get_override)
                .put(pricing::update_override)
                .delete(pricing::delete_override),
        )
}
