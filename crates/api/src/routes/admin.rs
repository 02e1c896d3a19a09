//! Route definitions for the `/admin` surface.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin role.
///
/// ```text
/// GET    /stats                                         -> stats
/// GET    /users                                         -> list_users
/// PATCH  /users/{id}/status                             -> set_user_status
/// GET    /startups                                      -> list_startups
/// PATCH  /startups/{id}/verify                          -> verify_startup
/// GET    /campaigns                                     -> list_campaigns
/// POST   /review-campaign/{campaign_id}                 -> review_campaign
/// POST   /approve-reject-milestones/{campaign_id}/{milestone_id}
/// GET    /predefined-milestones                         -> list_predefined_milestones
/// POST   /predefined-milestones                         -> create_predefined_milestone
/// PUT    /predefined-milestones/{id}                    -> update_predefined_milestone
/// DELETE /predefined-milestones/{id}                    -> delete_predefined_milestone
/// GET    /blogs                                         -> list_blogs
/// POST   /blogs                                         -> create_blog
/// PUT    /blogs/{id}                                    -> update_blog
/// DELETE /blogs/{id}                                    -> delete_blog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/status", patch(admin::set_user_status))
        .route("/startups", get(admin::list_startups))
        .route("/startups/{id}/verify", patch(admin::verify_startup))
        .route("/campaigns", get(admin::list_campaigns))
        .route(
            "/review-campaign/{campaign_id}",
            post(admin::review_campaign),
        )
        .route(
            "/approve-reject-milestones/{campaign_id}/{milestone_id}",
            post(admin::review_milestone),
        )
        .route(
            "/predefined-milestones",
            get(admin::list_predefined_milestones).post(admin::create_predefined_milestone),
        )
        .route(
            "/predefined-milestones/{id}",
            put(admin::update_predefined_milestone).delete(admin::delete_predefined_milestone),
        )
        .route("/blogs", get(admin::list_blogs).post(admin::create_blog))
        .route(
            "/blogs/{id}",
            put(admin::update_blog).delete(admin::delete_blog),
        )
}
