pub mod auth;
pub mod health;
pub mod master_data;
pub mod organizations;
pub mod pricing;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /registrations                       register organization + user (public)
///
/// /lookups/{kind}                      active lookup rows (public)
/// /countries                           active countries (public)
/// /currencies                          active currencies (public)
/// /categories                          active categories (public)
/// /membership-tiers                    active membership tiers (public)
///
/// /pricing/calculate                   fee calculation (public)
///
/// /organizations/me                    own profile (seeker)
/// /organizations/me/membership         activate, cancel (seeker)
/// /organizations/me/pricing            own fees (seeker)
///
/// /admin/lookups/{kind}[/{id}]         CRUD (admin only)
/// /admin/countries[/{id}]              CRUD
/// /admin/currencies[/{id}]             CRUD
/// /admin/categories[/{id}]             CRUD
/// /admin/membership-tiers[/{id}]       CRUD
/// /admin/pricing/catalog               loaded templates, rules, overrides
/// /admin/pricing/templates[/{id}]      CRUD
/// /admin/pricing/rules[/{id}]          CRUD
/// /admin/pricing/overrides[/{id}]      CRUD
/// /admin/organizations                 list profiles
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = master_data::admin_router()
        .nest("/pricing", pricing::admin_router())
        .nest("/organizations", organizations::admin_router());

    Router::new()
        .nest("/auth", auth::router())
        .nest("/registrations", registration::router())
        .merge(master_data::public_router())
        .nest("/pricing", pricing::public_router())
        .nest("/organizations", organizations::router())
        .nest("/admin", admin)
}
