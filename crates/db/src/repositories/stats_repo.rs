//! Aggregate queries backing the admin dashboard.

use sqlx::PgPool;
use raisehub_core::types::Amount;

use crate::models::stats::{LabelCount, PlatformStats};

/// Read-only platform statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Collect platform-wide totals.
    ///
    /// Released funds are summed per campaign and capped at what that
    /// campaign actually raised.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        let users_by_role = sqlx::query_as::<_, LabelCount>(
            "SELECT r.name AS label, COUNT(u.id) AS count
             FROM roles r
             LEFT JOIN users u ON u.role_id = r.id
             GROUP BY r.name
             ORDER BY r.name",
        )
        .fetch_all(pool)
        .await?;

        let campaigns_by_status = sqlx::query_as::<_, LabelCount>(
            "SELECT status AS label, COUNT(*) AS count
             FROM campaigns
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let (startups_total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM startups")
            .fetch_one(pool)
            .await?;

        let (investments_total, total_raised): (i64, Amount) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(amount), 0)::BIGINT FROM investments",
        )
        .fetch_one(pool)
        .await?;

        let (total_released,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(LEAST(released.approved, c.raised_amount::DOUBLE PRECISION)), 0)
             FROM campaigns c
             JOIN (
                SELECT campaign_id, SUM(fund_percentage) AS approved
                FROM campaign_milestones
                WHERE admin_approval_status = 'approved'
                GROUP BY campaign_id
             ) released ON released.campaign_id = c.id",
        )
        .fetch_one(pool)
        .await?;

        Ok(PlatformStats {
            users_by_role,
            campaigns_by_status,
            startups_total,
            investments_total,
            total_raised,
            total_released,
        })
    }
}
