//! Investment validation and funding release arithmetic.
//!
//! Released funds are the allocations of admin-approved milestones, never
//! more than what investors actually committed.

use serde::Serialize;

use crate::campaign::{STATUS_FUNDED, STATUS_LIVE};
use crate::error::CoreError;
use crate::milestone::{APPROVAL_APPROVED, APPROVAL_REJECTED, PROGRESS_COMPLETED};
use crate::types::{Amount, Timestamp};

/// Campaign state needed to accept an investment.
#[derive(Debug, Clone, Copy)]
pub struct InvestmentTarget<'a> {
    pub status: &'a str,
    pub deadline: Timestamp,
    pub min_investment: Amount,
    pub funding_target: Amount,
    pub raised_amount: Amount,
}

/// Validate an investment of `amount` into the campaign at `now`.
pub fn validate_investment(
    target: &InvestmentTarget<'_>,
    amount: Amount,
    now: Timestamp,
) -> Result<(), CoreError> {
    if target.status != STATUS_LIVE {
        return Err(CoreError::Conflict(format!(
            "Campaign is not accepting investments (status '{}')",
            target.status
        )));
    }
    if target.deadline <= now {
        return Err(CoreError::Conflict(
            "Campaign deadline has passed".into(),
        ));
    }
    if amount < target.min_investment {
        return Err(CoreError::Validation(format!(
            "Minimum investment is {}",
            target.min_investment
        )));
    }
    let remaining = remaining_amount(target.funding_target, target.raised_amount);
    if amount > remaining {
        return Err(CoreError::Validation(format!(
            "Investment exceeds the remaining funding target ({remaining})"
        )));
    }
    Ok(())
}

/// Amount still needed to reach the funding target.
pub fn remaining_amount(funding_target: Amount, raised: Amount) -> Amount {
    (funding_target - raised).max(0)
}

/// Campaign status after an investment raised the total to `raised`.
pub fn status_after_investment(funding_target: Amount, raised: Amount) -> &'static str {
    if raised >= funding_target {
        STATUS_FUNDED
    } else {
        STATUS_LIVE
    }
}

// ---------------------------------------------------------------------------
// Funding summary
// ---------------------------------------------------------------------------

/// Minimal milestone view used for release computations.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneFunding<'a> {
    pub fund_percentage: f64,
    pub progress_status: &'a str,
    pub approval_status: &'a str,
}

/// Funding overview of one campaign.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FundingSummary {
    pub funding_target: Amount,
    pub raised_amount: Amount,
    pub remaining_amount: Amount,
    pub released_amount: f64,
    pub locked_amount: f64,
    /// Raised as a percentage of the target, capped at 100.
    pub progress_percent: f64,
    pub milestones_total: usize,
    pub milestones_completed: usize,
    pub milestones_approved: usize,
    pub milestones_rejected: usize,
}

/// Sum of allocations of approved milestones, capped at `raised`.
pub fn released_amount(raised: Amount, milestones: &[MilestoneFunding<'_>]) -> f64 {
    let approved: f64 = milestones
        .iter()
        .filter(|m| m.approval_status == APPROVAL_APPROVED)
        .map(|m| m.fund_percentage)
        .sum();
    approved.min(raised.max(0) as f64)
}

/// Build the funding summary for a campaign.
pub fn summarize(
    funding_target: Amount,
    raised: Amount,
    milestones: &[MilestoneFunding<'_>],
) -> FundingSummary {
    let released = released_amount(raised, milestones);
    let progress_percent = if funding_target > 0 {
        (raised as f64 / funding_target as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    FundingSummary {
        funding_target,
        raised_amount: raised,
        remaining_amount: remaining_amount(funding_target, raised),
        released_amount: released,
        locked_amount: (raised as f64 - released).max(0.0),
        progress_percent,
        milestones_total: milestones.len(),
        milestones_completed: milestones
            .iter()
            .filter(|m| m.progress_status == PROGRESS_COMPLETED)
            .count(),
        milestones_approved: milestones
            .iter()
            .filter(|m| m.approval_status == APPROVAL_APPROVED)
            .count(),
        milestones_rejected: milestones
            .iter()
            .filter(|m| m.approval_status == APPROVAL_REJECTED)
            .count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
