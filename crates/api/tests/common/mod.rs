#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use raisehub_api::config::ServerConfig;
use raisehub_api::middleware::auth::USER_ID_HEADER;
use raisehub_api::router::build_app_router;
use raisehub_api::state::AppState;
use raisehub_chain::{ChainError, MintReceipt, MintRequest, NftMinter};
use raisehub_core::types::DbId;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and minting disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        password_min_length: 8,
        chain: None,
    }
}

/// Build the full application router, using the given database pool.
///
/// Goes through `build_app_router` so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None)
}

/// Same as [`build_test_app`] with a minter installed.
pub fn build_test_app_with_minter(pool: PgPool, minter: Arc<dyn NftMinter>) -> Router {
    build_app(pool, Some(minter))
}

fn build_app(pool: PgPool, minter: Option<Arc<dyn NftMinter>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        minter,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fake minter
// ---------------------------------------------------------------------------

/// In-process minter that either succeeds with sequential token ids or
/// fails like an RPC error.
pub struct FakeMinter {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeMinter {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NftMinter for FakeMinter {
    async fn mint(&self, request: &MintRequest) -> Result<MintReceipt, ChainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(ChainError::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            });
        }
        Ok(MintReceipt {
            token_id: format!("{}", request.metadata.investment_id * 100 + n as i64),
            tx_hash: format!("0x{:064x}", n),
        })
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<DbId>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, user_id: DbId) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_as(app: Router, uri: &str, user_id: DbId, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), Some(body)).await
}

pub async fn post_as(app: Router, uri: &str, user_id: DbId) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), None).await
}

pub async fn put_json_as(app: Router, uri: &str, user_id: DbId, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user_id), Some(body)).await
}

pub async fn patch_json_as(app: Router, uri: &str, user_id: DbId, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(user_id), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, user_id: DbId) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user_id), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the `data` field of the envelope.
pub async fn expect_data(response: Response<Body>, status: StatusCode) -> Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json["data"].clone()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const PASSWORD: &str = "correct-horse-1";

/// Sign up through the API and return the new user id.
pub async fn signup(pool: &PgPool, email: &str, role: &str) -> DbId {
    let app = build_test_app(pool.clone());
    let body = json!({
        "email": email,
        "password": PASSWORD,
        "full_name": "Test Person",
        "role": role,
    });
    let data = expect_data(post_json(app, "/api/auth/signup", body).await, StatusCode::CREATED).await;
    data["id"].as_i64().unwrap()
}

/// Create an admin. Admins cannot sign up, so the role is set in SQL.
pub async fn create_admin(pool: &PgPool, email: &str) -> DbId {
    let id = signup(pool, email, "investor").await;
    sqlx::query("UPDATE users SET role_id = (SELECT id FROM roles WHERE name = 'admin') WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Valid step-1 body.
pub fn basics_body(title: &str, target: i64) -> Value {
    json!({
        "title": title,
        "description": "Community-owned solar for rural clinics",
        "category": "Energy",
        "funding_target": target,
        "min_investment": 100,
        "equity_offered": 12.5,
        "deadline": (Utc::now() + Duration::days(30)).to_rfc3339(),
    })
}

/// Create a founder with a startup and a campaign that has been through
/// every wizard step and approved by `admin_id`. Returns
/// `(founder_id, campaign_id)`.
pub async fn live_campaign(pool: &PgPool, email: &str, admin_id: DbId, target: i64) -> (DbId, DbId) {
    let founder = signup(pool, email, "founder").await;
    let app = build_test_app(pool.clone());

    expect_data(
        post_json_as(
            app.clone(),
            "/api/startup/create-startup",
            founder,
            json!({ "name": "Sunbeam", "industry": "Energy", "stage": "mvp" }),
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
            basics_body("Solar microgrids", target),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let campaign_id = campaign["id"].as_i64().unwrap();

    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/startup/submit-campaign-story/{campaign_id}"),
            founder,
            json!({ "pitch": "Cheap clean power where the grid does not reach" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    expect_data(
        post_json_as(
            app.clone(),
            &format!("/api/startup/submit-milestones/{campaign_id}"),
            founder,
            json!({
                "custom_milestones": [
                    { "title": "Pilot site", "requirements": ["Site leased", "Panels installed"] },
                    { "title": "Ten villages", "requirements": ["Ten grids online"] }
                ]
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    expect_data(
        post_as(
            app.clone(),
            &format!("/api/startup/submit-campaign-for-review/{campaign_id}"),
            founder,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    expect_data(
        post_json_as(
            app,
            &format!("/api/admin/review-campaign/{campaign_id}"),
            admin_id,
            json!({ "decision": "approve" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    (founder, campaign_id)
}
