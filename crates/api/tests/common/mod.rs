#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use seeker_api::auth::jwt::JwtConfig;
use seeker_api::auth::password::hash_password;
use seeker_api::config::ServerConfig;
use seeker_api::router::build_app_router;
use seeker_api::state::AppState;
use seeker_core::roles::ROLE_ADMIN;
use seeker_db::models::user::{CreateUser, User};
use seeker_db::repositories::{RoleRepo, UserRepo};

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a decimal field, which the API serialises as a JSON string.
pub fn decimal(value: &serde_json::Value) -> Decimal {
    let text = value
        .as_str()
        .unwrap_or_else(|| panic!("expected a decimal string, got {value}"));
    Decimal::from_str(text).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a platform admin directly.
pub async fn create_admin(pool: &PgPool, username: &str) -> User {
    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN).await.unwrap().unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@platform.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id: role.id,
            organization_id: None,
        },
    )
    .await
    .unwrap()
}

/// Log in through the API and return the `data` payload.
pub async fn login(pool: &PgPool, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

/// Create an admin and return its access token.
pub async fn admin_token(pool: &PgPool) -> String {
    create_admin(pool, "platform_admin").await;
    let data = login(pool, "platform_admin", TEST_PASSWORD).await;
    data["access_token"].as_str().unwrap().to_string()
}

pub async fn lookup_id(pool: &PgPool, table: &str, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {table} WHERE name = $1"))
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table}/{name}: {e}"))
}

/// A valid registration body for a startup in India.
pub async fn registration_body(pool: &PgPool, username: &str) -> serde_json::Value {
    serde_json::json!({
        "organization_name": "Acme Research",
        "organization_type_id": lookup_id(pool, "organization_types", "Startup").await,
        "entity_type_id": lookup_id(pool, "entity_types", "Partnership").await,
        "country_id": lookup_id(pool, "countries", "India").await,
        "website": "https://acme.example",
        "contact_first_name": "Ada",
        "contact_last_name": "Lovelace",
        "contact_email": format!("{username}@acme.example"),
        "username": username,
        "password": "correct-horse-battery",
    })
}

/// Register an organization and return `(access_token, organization_id)`.
pub async fn register_seeker(pool: &PgPool, username: &str) -> (String, i64) {
    let body = registration_body(pool, username).await;
    let response = post_json(build_test_app(pool.clone()), "/api/v1/registrations", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    (
        data["access_token"].as_str().unwrap().to_string(),
        data["user"]["organization_id"].as_i64().unwrap(),
    )
}
