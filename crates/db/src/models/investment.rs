//! Investment model.

use serde::Serialize;
use sqlx::FromRow;
use raisehub_core::types::{Amount, DbId, Timestamp};

/// A row from the `investments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investment {
    pub id: DbId,
    pub campaign_id: DbId,
    pub investor_id: DbId,
    pub amount: Amount,
    pub created_at: Timestamp,
}

/// An investment joined with the campaign it went into, for the investor's portfolio.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioEntry {
    pub id: DbId,
    pub campaign_id: DbId,
    pub campaign_title: String,
    pub campaign_status: String,
    pub startup_name: String,
    pub amount: Amount,
    pub nft_status: Option<String>,
    pub created_at: Timestamp,
}
