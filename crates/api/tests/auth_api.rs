//! HTTP-level tests for login, token refresh, logout and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_admin, get_auth, login, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let admin = create_admin(&pool, "loginuser").await;

    let data = login(&pool, "loginuser", TEST_PASSWORD).await;

    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["expires_in"], 15 * 60);
    assert_eq!(data["user"]["id"], admin.id);
    assert_eq!(data["user"]["role"], "admin");
    assert!(data["user"]["organization_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_admin(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_locks_after_repeated_failures(pool: PgPool) {
    create_admin(&pool, "lockme").await;

    let bad = serde_json::json!({ "username": "lockme", "password": "nope" });
    for _ in 0..5 {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/login",
            bad.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The correct password is refused while the lock holds.
    let good = serde_json::json!({ "username": "lockme", "password": TEST_PASSWORD });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        good,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    create_admin(&pool, "refresher").await;
    let data = login(&pool, "refresher", TEST_PASSWORD).await;
    let refresh_token = data["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await["data"].clone();
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // The spent token cannot be replayed.
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    create_admin(&pool, "leaver").await;
    let data = login(&pool, "leaver", TEST_PASSWORD).await;
    let access = data["access_token"].as_str().unwrap();
    let refresh = data["refresh_token"].as_str().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        serde_json::json!({}),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_rejects_bad_tokens(pool: PgPool) {
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/countries",
        "garbage",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::get(common::build_test_app(pool), "/api/v1/admin/countries").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
