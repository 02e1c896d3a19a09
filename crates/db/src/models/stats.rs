//! Aggregate platform statistics for the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;
use raisehub_core::types::Amount;

/// A `(label, count)` pair from a `GROUP BY` query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Platform-wide totals.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub users_by_role: Vec<LabelCount>,
    pub campaigns_by_status: Vec<LabelCount>,
    pub startups_total: i64,
    pub investments_total: i64,
    pub total_raised: Amount,
    pub total_released: f64,
}
