//! Route definitions for the `/profile` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /           -> get_own
/// PUT  /           -> update_own
/// GET  /{user_id}  -> get_public
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get_own).put(profile::update_own))
        .route("/{user_id}", get(profile::get_public))
}
