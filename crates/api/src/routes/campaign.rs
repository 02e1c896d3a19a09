//! Route definitions for the `/campaign` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Routes mounted at `/campaign`.
///
/// ```text
/// GET  /list                  -> list
/// GET  /my-investments        -> my_investments (investor)
/// GET  /{id}                  -> get_public
/// GET  /{id}/funding-summary  -> get_funding_summary
/// POST /{id}/invest           -> invest (investor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(campaign::list))
        .route("/my-investments", get(campaign::my_investments))
        .route("/{id}", get(campaign::get_public))
        .route("/{id}/funding-summary", get(campaign::get_funding_summary))
        .route("/{id}/invest", post(campaign::invest))
}
