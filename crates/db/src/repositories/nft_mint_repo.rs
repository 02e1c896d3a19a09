//! Repository for the `nft_mints` table.

use std::time::Duration;

use sqlx::PgPool;
use raisehub_core::types::DbId;

use crate::models::nft::{NftMint, MINT_FAILED, MINT_MINTED, MINT_PENDING};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, investment_id, investor_id, wallet_address, token_id, tx_hash, \
    status, error, created_at, updated_at";

/// Tracks the lifecycle of investment certificate mints.
pub struct NftMintRepo;

impl NftMintRepo {
    /// Find the mint record of an investment.
    pub async fn find_by_investment(
        pool: &PgPool,
        investment_id: DbId,
    ) -> Result<Option<NftMint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nft_mints WHERE investment_id = $1");
        sqlx::query_as::<_, NftMint>(&query)
            .bind(investment_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a `pending` mint record, or reset a `failed` one for retry.
    ///
    /// A `pending` record untouched for longer than `stale_after` belongs to
    /// a request that died mid-mint and is reclaimed as well. Returns `None`
    /// when a minted or live pending record already exists.
    pub async fn claim_pending(
        pool: &PgPool,
        investment_id: DbId,
        investor_id: DbId,
        wallet_address: &str,
        stale_after: Duration,
    ) -> Result<Option<NftMint>, sqlx::Error> {
        let query = format!(
            "INSERT INTO nft_mints (investment_id, investor_id, wallet_address, status)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_nft_mints_investment_id DO UPDATE SET
                wallet_address = EXCLUDED.wallet_address,
                status = EXCLUDED.status,
                error = NULL
             WHERE nft_mints.status = $5
                OR (nft_mints.status = $4
                    AND nft_mints.updated_at < NOW() - make_interval(secs => $6))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NftMint>(&query)
            .bind(investment_id)
            .bind(investor_id)
            .bind(wallet_address)
            .bind(MINT_PENDING)
            .bind(MINT_FAILED)
            .bind(stale_after.as_secs_f64())
            .fetch_optional(pool)
            .await
    }

    /// Mark a mint as completed on chain.
    pub async fn mark_minted(
        pool: &PgPool,
        id: DbId,
        token_id: &str,
        tx_hash: &str,
    ) -> Result<NftMint, sqlx::Error> {
        let query = format!(
            "UPDATE nft_mints SET status = $2, token_id = $3, tx_hash = $4, error = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NftMint>(&query)
            .bind(id)
            .bind(MINT_MINTED)
            .bind(token_id)
            .bind(tx_hash)
            .fetch_one(pool)
            .await
    }

    /// Mark a mint as failed with the chain error.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<NftMint, sqlx::Error> {
        let query = format!(
            "UPDATE nft_mints SET status = $2, error = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NftMint>(&query)
            .bind(id)
            .bind(MINT_FAILED)
            .bind(error)
            .fetch_one(pool)
            .await
    }

    /// List an investor's mint records, newest first.
    pub async fn list_by_investor(
        pool: &PgPool,
        investor_id: DbId,
    ) -> Result<Vec<NftMint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM nft_mints WHERE investor_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, NftMint>(&query)
            .bind(investor_id)
            .fetch_all(pool)
            .await
    }
}
