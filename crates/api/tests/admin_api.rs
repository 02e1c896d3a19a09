//! HTTP-level tests for the admin surface: stats, users, startups,
//! campaign review, and predefined milestone templates.

mod common;

use axum::http::StatusCode;
use common::{
    basics_body, body_json, delete_as, expect_data, get_as, patch_json_as, post_as, post_json_as,
    put_json_as, signup,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_reflect_platform_activity(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let (_founder, campaign_id) = common::live_campaign(&pool, "f@example.com", admin, 2_000).await;
    let investor = signup(&pool, "i@example.com", "investor").await;
    let app = common::build_test_app(pool);

    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/campaign/{campaign_id}/invest"),
            investor,
            json!({ "amount": 700 }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let stats = expect_data(get_as(app, "/api/admin/stats", admin).await, StatusCode::OK).await;
    assert_eq!(stats["startups_total"], 1);
    assert_eq!(stats["investments_total"], 1);
    assert_eq!(stats["total_raised"], 700);
    assert_eq!(stats["total_released"], 0.0);

    let roles = stats["users_by_role"].as_array().unwrap();
    let count_for = |role: &str| {
        roles
            .iter()
            .find(|r| r["label"] == role)
            .map(|r| r["count"].as_i64().unwrap())
            .unwrap()
    };
    assert_eq!(count_for("admin"), 1);
    assert_eq!(count_for("founder"), 1);
    assert_eq!(count_for("investor"), 1);

    let live = stats["campaigns_by_status"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["label"] == "live")
        .unwrap();
    assert_eq!(live["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_management(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let investor = signup(&pool, "i@example.com", "investor").await;
    signup(&pool, "f@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let investors = expect_data(get_as(app.clone(), "/api/admin/users?role=investor", admin).await, StatusCode::OK).await;
    assert_eq!(investors.as_array().unwrap().len(), 1);
    assert_eq!(investors[0]["id"], investor);

    let response = get_as(app.clone(), "/api/admin/users?role=wizard", admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let user = expect_data(
        patch_json_as(
            app.clone(),
            &format!("/api/admin/users/{investor}/status"),
            admin,
            json!({ "is_active": false }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(user["is_active"], false);

    let response = get_as(app.clone(), "/api/auth/me", investor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admins cannot lock themselves out.
    let response = patch_json_as(
        app.clone(),
        &format!("/api/admin/users/{admin}/status"),
        admin,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_as(
        app,
        "/api/admin/users/999999/status",
        admin,
        json!({ "is_active": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_startup_verification(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let founder = signup(&pool, "f@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let startup = expect_data(
        post_json_as(
            app.clone(),
            "/api/startup/create-startup",
            founder,
            json!({ "name": "Verified Co", "industry": "Health", "stage": "idea" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = startup["id"].as_i64().unwrap();

    let listed = expect_data(get_as(app.clone(), "/api/admin/startups", admin).await, StatusCode::OK).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let verified = expect_data(
        patch_json_as(
            app.clone(),
            &format!("/api/admin/startups/{id}/verify"),
            admin,
            json!({ "is_verified": true }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(verified["is_verified"], true);

    let response = patch_json_as(
        app,
        "/api/admin/startups/999999/verify",
        admin,
        json!({ "is_verified": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campaign_review_reject_and_resubmit(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let founder = signup(&pool, "f@example.com", "founder").await;
    let app = common::build_test_app(pool);

    expect_data(
        post_json_as(
            app.clone(),
            "/api/startup/create-startup",
            founder,
            json!({ "name": "Retry", "industry": "Energy", "stage": "mvp" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let campaign = expect_data(
        post_json_as(
            app.clone(),
            "/api/startup/submit-basic-campaign-details",
            founder,
            basics_body("Retry campaign", 5_000),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = campaign["id"].as_i64().unwrap();

    // Drafts cannot be reviewed.
    let response = post_json_as(
        app.clone(),
        &format!("/api/admin/review-campaign/{id}"),
        admin,
        json!({ "decision": "approve" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/startup/submit-campaign-story/{id}"),
            founder,
            json!({ "pitch": "Try again" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/startup/submit-milestones/{id}"),
            founder,
            json!({ "custom_milestones": [{ "title": "Ship", "requirements": ["Shipped"] }] }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    expect_data(
        post_as(app.clone(), &format!("/api/startup/submit-campaign-for-review/{id}"), founder).await,
        StatusCode::OK,
    )
    .await;

    let queue = expect_data(
        get_as(app.clone(), "/api/admin/campaigns?status=under_review", admin).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(queue.as_array().unwrap().len(), 1);

    let response = get_as(app.clone(), "/api/admin/campaigns?status=bogus", admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A rejection needs a reason.
    let response = post_json_as(
        app.clone(),
        &format!("/api/admin/review-campaign/{id}"),
        admin,
        json!({ "decision": "reject" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejected = expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/admin/review-campaign/{id}"),
            admin,
            json!({ "decision": "reject", "reason": "Pitch is too thin" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["rejection_reason"], "Pitch is too thin");

    // Rejected campaigns are editable and can be resubmitted.
    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/startup/submit-campaign-story/{id}"),
            founder,
            json!({ "pitch": "A much better pitch" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let resubmitted = expect_data(
        post_as(app.clone(), &format!("/api/startup/submit-campaign-for-review/{id}"), founder).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(resubmitted["status"], "under_review");
    assert!(resubmitted["rejection_reason"].is_null());

    let approved = expect_data(
        post_json_as(
            app,
            &format!("/api/admin/review-campaign/{id}"),
            admin,
            json!({ "decision": "approve" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(approved["status"], "live");
    assert!(approved["approved_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_predefined_milestone_crud(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin@example.com").await;
    let founder = signup(&pool, "f@example.com", "founder").await;
    let app = common::build_test_app(pool);

    let seeded = expect_data(get_as(app.clone(), "/api/admin/predefined-milestones", admin).await, StatusCode::OK).await;
    let seeded_count = seeded.as_array().unwrap().len();
    assert!(seeded_count >= 1);

    let response = post_json_as(
        app.clone(),
        "/api/admin/predefined-milestones",
        admin,
        json!({ "title": "Audit", "requirements": ["   "] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let created = expect_data(
        post_json_as(
            app.clone(),
            "/api/admin/predefined-milestones",
            admin,
            json!({
                "title": "  Security audit ",
                "description": "Third-party review",
                "requirements": ["Auditor hired", " Report published "],
                "sort_order": 10,
            }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Security audit");
    assert_eq!(created["requirements"][1], "Report published");
    assert_eq!(created["is_active"], true);

    let updated = expect_data(
        put_json_as(
            app.clone(),
            &format!("/api/admin/predefined-milestones/{id}"),
            admin,
            json!({ "description": "External review" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["description"], "External review");
    assert_eq!(updated["title"], "Security audit");

    let response = delete_as(app.clone(), &format!("/api/admin/predefined-milestones/{id}"), admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deactivated templates disappear for founders but stay for admins.
    let active = expect_data(get_as(app.clone(), "/api/startup/predefined-milestones", founder).await, StatusCode::OK).await;
    assert_eq!(active.as_array().unwrap().len(), seeded_count);
    let all = expect_data(
        get_as(app.clone(), "/api/admin/predefined-milestones?include_inactive=true", admin).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), seeded_count + 1);

    let response = delete_as(app, &format!("/api/admin/predefined-milestones/{id}"), admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_routes_require_admin(pool: PgPool) {
    let investor = signup(&pool, "i@example.com", "investor").await;
    let app = common::build_test_app(pool);

    let response = get_as(app.clone(), "/api/admin/users", investor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let response = common::get(app, "/api/admin/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
