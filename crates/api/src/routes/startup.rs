//! Route definitions for the founder `/startup` surface.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::startup;
use crate::state::AppState;

/// Routes mounted at `/startup`.
///
/// ```text
/// POST  /create-startup                                  -> create_startup
/// GET   /my-startup                                      -> my_startup
/// PUT   /update-startup                                  -> update_startup
/// GET   /browse                                          -> browse (public)
/// GET   /predefined-milestones                           -> predefined_milestones
/// POST  /submit-basic-campaign-details                   -> submit_basics
/// PUT   /update-basic-campaign-details/{campaign_id}     -> update_basics
/// POST  /submit-campaign-story/{campaign_id}             -> submit_story
/// POST  /submit-milestones/{campaign_id}                 -> submit_milestones
/// POST  /submit-campaign-for-review/{campaign_id}        -> submit_for_review
/// GET   /my-campaigns                                    -> my_campaigns
/// GET   /campaign/{campaign_id}                          -> get_own_campaign
/// PATCH /milestones/{campaign_id}/{milestone_id}/requirements/{requirement_id}
/// POST  /close-campaign/{campaign_id}                    -> close_campaign
/// GET   /{id}                                            -> get_startup (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-startup", post(startup::create_startup))
        .route("/my-startup", get(startup::my_startup))
        .route("/update-startup", put(startup::update_startup))
        .route("/browse", get(startup::browse))
        .route("/predefined-milestones", get(startup::predefined_milestones))
        .route(
            "/submit-basic-campaign-details",
            post(startup::submit_basics),
        )
        .route(
            "/update-basic-campaign-details/{campaign_id}",
            put(startup::update_basics),
        )
        .route(
            "/submit-campaign-story/{campaign_id}",
            post(startup::submit_story),
        )
        .route(
            "/submit-milestones/{campaign_id}",
            post(startup::submit_milestones),
        )
        .route(
            "/submit-campaign-for-review/{campaign_id}",
            post(startup::submit_for_review),
        )
        .route("/my-campaigns", get(startup::my_campaigns))
        .route("/campaign/{campaign_id}", get(startup::get_own_campaign))
        .route(
            "/milestones/{campaign_id}/{milestone_id}/requirements/{requirement_id}",
            patch(startup::update_requirement),
        )
        .route("/close-campaign/{campaign_id}", post(startup::close_campaign))
        .route("/{id}", get(startup::get_startup))
}
