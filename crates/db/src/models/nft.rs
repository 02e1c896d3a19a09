//! NFT mint record model.

use serde::Serialize;
use sqlx::FromRow;
use raisehub_core::types::{DbId, Timestamp};

pub const MINT_PENDING: &str = "pending";
pub const MINT_MINTED: &str = "minted";
pub const MINT_FAILED: &str = "failed";

/// A row from `nft_mints`: one investment certificate per investment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NftMint {
    pub id: DbId,
    pub investment_id: DbId,
    pub investor_id: DbId,
    pub wallet_address: String,
    pub token_id: Option<String>,
    pub tx_hash: Option<String>,
    pub status: String,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
