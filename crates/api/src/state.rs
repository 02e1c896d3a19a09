use std::sync::Arc;

use raisehub_chain::NftMinter;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: raisehub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Certificate minter; `None` when no chain endpoint is configured.
    pub minter: Option<Arc<dyn NftMinter>>,
}
