use axum::routing::post;
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST /    -> register (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(registration::register))
}
