//! Route definitions for master data.

use axum::routing::get;
use axum::Router;

use crate::handlers::master_data;
use crate::state::AppState;

/// Public, read-only routes mounted at the API root.
///
/// ```text
/// GET /lookups/{kind}       -> list_active_lookups
/// GET /countries            -> list_active_countries
/// GET /currencies           -> list_active_currencies
/// GET /categories           -> list_active_categories (?domain_group_id=)
/// GET /membership-tiers     -> list_active_membership_tiers
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/lookups/{kind}", get(master_data::list_active_lookups))
        .route("/countries", get(master_data::list_active_countries))
        .route("/currencies", get(master_data::list_active_currencies))
        .route("/categories", get(master_data::list_active_categories))
        .route(
            "/membership-tiers",
            get(master_data::list_active_membership_tiers),
        )
}

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET, POST           /lookups/{kind}
/// GET, PUT, DELETE    /lookups/{kind}/{id}
/// GET, POST           /countries
/// GET, PUT, DELETE    /countries/{id}
/// GET, POST           /currencies
/// GET, PUT, DELETE    /currencies/{id}
/// GET, POST           /categories
/// GET, PUT, DELETE    /categories/{id}
/// GET, POST           /membership-tiers
/// GET, PUT, DELETE    /membership-tiers/{id}
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/lookups/{kind}",
            get(master_data::list_lookups).post(master_data::create_lookup),
        )
        .route(
            "/lookups/{kind}/{id}",
            get(master_data::get_lookup)
                .put(master_data::update_lookup)
                .delete(master_data::delete_lookup),
        )
        .route(
            "/countries",
            get(master_data::list_countries).post(master_data::create_country),
        )
        .route(
            "/countries/{id}",
            get(master_data::get_country)
                .put(master_data::update_country)
                .delete(master_data::delete_country),
        )
        .route(
            "/currencies",
            get(master_data::list_currencies).post(master_data::create_currency),
        )
        .route(
            "/currencies/{id}",
            get(master_data::get_currency)
                .put(master_data::update_currency)
                .delete(master_data::delete_currency),
        )
        .route(
            "/categories",
            get(master_data::list_categories).post(master_data::create_category),
        )
        .route(
            "/categories/{id}",
            get(master_data::get_category)
                .put(master_data::update_category)
                .delete(master_data::delete_category),
        )
        .route(
            "/membership-tiers",
            get(master_data::list_membership_tiers).post(master_data::create_membership_tier),
        )
        .route(
            "/membership-tiers/{id}",
            get(master_data::get_membership_tier)
                .put(master_data::update_membership_tier)
                .delete(master_data::delete_membership_tier),
        )
}
