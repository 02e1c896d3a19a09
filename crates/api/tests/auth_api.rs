//! HTTP-level integration tests for signup, login, header auth, RBAC, and
//! profiles.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, expect_data, get, get_as, post_json, post_json_as, put_json_as, signup, PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_creates_user_and_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "email": "Ada@Example.com",
        "password": PASSWORD,
        "full_name": "Ada Lovelace",
        "role": "founder",
    });
    let user = expect_data(post_json(app, "/api/auth/signup", body).await, StatusCode::CREATED).await;

    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "founder");
    assert_eq!(user["is_active"], true);
    assert!(user.get("password_hash").is_none());

    let id = user["id"].as_i64().unwrap();
    let app = common::build_test_app(pool);
    let own = expect_data(get_as(app, "/api/profile", id).await, StatusCode::OK).await;
    assert_eq!(own["user"]["id"], id);
    assert_eq!(own["profile"]["user_id"], id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_rejects_admin_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "email": "boss@example.com",
        "password": PASSWORD,
        "full_name": "Boss",
        "role": "admin",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let short = json!({
        "email": "short@example.com",
        "password": "abc",
        "full_name": "Short",
        "role": "investor",
    });
    let response = post_json(app.clone(), "/api/auth/signup", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({
        "email": "not-an-email",
        "password": PASSWORD,
        "full_name": "Nobody",
        "role": "investor",
    });
    let response = post_json(app, "/api/auth/signup", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_signup_conflicts(pool: PgPool) {
    signup(&pool, "dup@example.com", "investor").await;

    let app = common::build_test_app(pool);
    let body = json!({
        "email": "DUP@example.com",
        "password": PASSWORD,
        "full_name": "Again",
        "role": "founder",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "An account with this email already exists"
    );
}

// ---------------------------------------------------------------------------
// Login and header auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_records_last_login(pool: PgPool) {
    let id = signup(&pool, "login@example.com", "investor").await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "login@example.com", "password": PASSWORD });
    let user = expect_data(post_json(app, "/api/auth/login", body).await, StatusCode::OK).await;

    assert_eq!(user["id"], id);
    assert!(user["last_login_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_and_unknown_email(pool: PgPool) {
    signup(&pool, "pw@example.com", "investor").await;
    let app = common::build_test_app(pool);

    let wrong = json!({ "email": "pw@example.com", "password": "incorrect-password" });
    let response = post_json(app.clone(), "/api/auth/login", wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let ghost = json!({ "email": "ghost@example.com", "password": PASSWORD });
    let response = post_json(app, "/api/auth/login", ghost).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_user_is_locked_out(pool: PgPool) {
    let id = signup(&pool, "gone@example.com", "investor").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = json!({ "email": "gone@example.com", "password": PASSWORD });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_as(app, "/api/auth/me", id).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_valid_user_id_header(pool: PgPool) {
    let id = signup(&pool, "me@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_as(app.clone(), "/api/auth/me", 999_999).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let me = expect_data(get_as(app, "/api/auth/me", id).await, StatusCode::OK).await;
    assert_eq!(me["email"], "me@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_guards_reject_wrong_role(pool: PgPool) {
    let investor = signup(&pool, "inv@example.com", "investor").await;
    let founder = signup(&pool, "fdr@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let response = get_as(app.clone(), "/api/startup/my-startup", investor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_as(app.clone(), "/api/campaign/my-investments", founder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_as(app, "/api/admin/stats", founder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_partial_update(pool: PgPool) {
    let id = signup(&pool, "prof@example.com", "investor").await;
    let app = common::build_test_app(pool);

    let body = json!({
        "full_name": "Grace Hopper",
        "bio": "Angel investor",
        "wallet_address": "0x52908400098527886E0F7030069857D2E4169EE7",
        "min_ticket": 500,
        "investment_focus": ["energy", "health"],
    });
    let own = expect_data(put_json_as(app.clone(), "/api/profile", id, body).await, StatusCode::OK).await;
    assert_eq!(own["user"]["full_name"], "Grace Hopper");
    assert_eq!(own["profile"]["bio"], "Angel investor");
    assert_eq!(own["profile"]["min_ticket"], 500);

    // Fields left out keep their values.
    let own = expect_data(
        put_json_as(app.clone(), "/api/profile", id, json!({ "location": "Lisbon" })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(own["profile"]["bio"], "Angel investor");
    assert_eq!(own["profile"]["location"], "Lisbon");

    // max below the stored min is rejected.
    let response = put_json_as(app, "/api/profile", id, json!({ "max_ticket": 100 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_rejects_bad_wallet_and_url(pool: PgPool) {
    let id = signup(&pool, "badprof@example.com", "investor").await;
    let app = common::build_test_app(pool);

    let response = put_json_as(
        app.clone(),
        "/api/profile",
        id,
        json!({ "wallet_address": "0x123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_as(app, "/api/profile", id, json!({ "website_url": "ftp://x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_profile_hides_email_from_non_admins(pool: PgPool) {
    let target = signup(&pool, "target@example.com", "founder").await;
    let other = signup(&pool, "other@example.com", "investor").await;
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/profile/{target}");

    let anon = expect_data(get(app.clone(), &uri).await, StatusCode::OK).await;
    assert_eq!(anon["full_name"], "Test Person");
    assert!(anon.get("email").is_none());

    let as_user = expect_data(get_as(app.clone(), &uri, other).await, StatusCode::OK).await;
    assert!(as_user.get("email").is_none());

    let as_admin = expect_data(get_as(app.clone(), &uri, admin).await, StatusCode::OK).await;
    assert_eq!(as_admin["email"], "target@example.com");

    let response = get(app, "/api/profile/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_then_use_returned_id(pool: PgPool) {
    signup(&pool, "flow@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "flow@example.com", "password": PASSWORD });
    let user = expect_data(post_json(app.clone(), "/api/auth/login", body).await, StatusCode::OK).await;
    let id = user["id"].as_i64().unwrap();

    let response = post_json_as(
        app,
        "/api/startup/create-startup",
        id,
        json!({ "name": "Flowcell", "industry": "Energy", "stage": "idea" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
