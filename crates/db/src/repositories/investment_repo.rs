//! Repository for the `investments` table.

use sqlx::{PgConnection, PgPool};
use raisehub_core::types::{Amount, DbId};

use crate::models::investment::{Investment, PortfolioEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, investor_id, amount, created_at";

/// Provides insert and lookup operations for investments.
pub struct InvestmentRepo;

impl InvestmentRepo {
    /// Insert an investment inside the caller's transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        campaign_id: DbId,
        investor_id: DbId,
        amount: Amount,
    ) -> Result<Investment, sqlx::Error> {
        let query = format!(
            "INSERT INTO investments (campaign_id, investor_id, amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Investment>(&query)
            .bind(campaign_id)
            .bind(investor_id)
            .bind(amount)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find an investment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Investment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investments WHERE id = $1");
        sqlx::query_as::<_, Investment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an investor's portfolio, newest first.
    pub async fn list_portfolio(
        pool: &PgPool,
        investor_id: DbId,
    ) -> Result<Vec<PortfolioEntry>, sqlx::Error> {
        sqlx::query_as::<_, PortfolioEntry>(
            "SELECT i.id, i.campaign_id, c.title AS campaign_title, c.status AS campaign_status,
                    s.name AS startup_name, i.amount, n.status AS nft_status, i.created_at
             FROM investments i
             JOIN campaigns c ON c.id = i.campaign_id
             JOIN startups s ON s.id = c.startup_id
             LEFT JOIN nft_mints n ON n.investment_id = i.id
             WHERE i.investor_id = $1
             ORDER BY i.created_at DESC, i.id DESC",
        )
        .bind(investor_id)
        .fetch_all(pool)
        .await
    }
}
