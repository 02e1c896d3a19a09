//! Route definitions for the `/nft` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::nft;
use crate::state::AppState;

/// Routes mounted at `/nft`.
///
/// ```text
/// POST /mint/{investment_id}  -> mint
/// GET  /my-nfts               -> my_nfts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mint/{investment_id}", post(nft::mint))
        .route("/my-nfts", get(nft::my_nfts))
}
