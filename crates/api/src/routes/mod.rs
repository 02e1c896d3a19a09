pub mod admin;
pub mod auth;
pub mod blog;
pub mod campaign;
pub mod health;
pub mod nft;
pub mod profile;
pub mod startup;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup, /auth/login                        public
/// /auth/me                                         any user
///
/// /profile                                         own profile (get, update)
/// /profile/{user_id}                               public profile
///
/// /startup/create-startup, my-startup, ...         founder
/// /startup/browse, /startup/{id}                   public
/// /startup/submit-*                                campaign wizard (founder)
/// /startup/milestones/{c}/{m}/requirements/{r}     requirement progress
///
/// /campaign/list, /campaign/{id}                   public
/// /campaign/{id}/funding-summary                   public
/// /campaign/{id}/invest, /campaign/my-investments  investor
///
/// /admin/...                                       admin only
///
/// /nft/mint/{investment_id}, /nft/my-nfts          investor
///
/// /blog, /blog/{slug}                              public
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/startup", startup::router())
        .nest("/campaign", campaign::router())
        .nest("/admin", admin::router())
        .nest("/nft", nft::router())
        .nest("/blog", blog::router())
}
