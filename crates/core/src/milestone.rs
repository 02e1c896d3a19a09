//! Campaign milestones: merging, fund allocation, progress, and admin review.
//!
//! A campaign's milestone set is built from admin-curated templates
//! (predefined milestones) plus founder-authored custom milestones. Every
//! milestone in the set carries an equal allocation of the funding target.
//! Founders tick off requirements as work lands; once all requirements are
//! complete an admin approves the milestone, which releases its allocation.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::campaign::{STATUS_CLOSED, STATUS_FUNDED, STATUS_LIVE};
use crate::error::CoreError;
use crate::types::{Amount, DbId};

// ---------------------------------------------------------------------------
// Progress status constants
// ---------------------------------------------------------------------------

pub const PROGRESS_NOT_STARTED: &str = "not_started";
pub const PROGRESS_IN_PROGRESS: &str = "in_progress";
pub const PROGRESS_COMPLETED: &str = "completed";

// ---------------------------------------------------------------------------
// Admin approval status constants
// ---------------------------------------------------------------------------

pub const APPROVAL_PENDING: &str = "pending";
pub const APPROVAL_APPROVED: &str = "approved";
pub const APPROVAL_REJECTED: &str = "rejected";

/// All valid admin review decisions.
pub const VALID_REVIEW_DECISIONS: &[&str] = &[APPROVAL_APPROVED, APPROVAL_REJECTED];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of milestones in one campaign.
pub const MAX_MILESTONES: usize = 20;

/// Maximum number of requirements per milestone.
pub const MAX_REQUIREMENTS: usize = 20;

/// Maximum length of a milestone title.
pub const MAX_TITLE_LEN: usize = 150;

// ---------------------------------------------------------------------------
// Merge inputs and output
// ---------------------------------------------------------------------------

/// A predefined milestone selected by the founder.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneTemplate {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
}

/// A founder-authored milestone as submitted in step 3.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CustomMilestone {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub target_date: Option<NaiveDate>,
}

/// One milestone of a merged set, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneDraft {
    pub predefined_milestone_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub target_date: Option<NaiveDate>,
    pub sort_order: i32,
    pub fund_percentage: f64,
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Remove duplicate ids while keeping first-seen order.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Arrange fetched templates in the order the founder requested them.
///
/// Every requested id must be present in `found`; the first missing id is
/// reported as not found.
pub fn order_templates(
    requested: &[DbId],
    found: Vec<MilestoneTemplate>,
) -> Result<Vec<MilestoneTemplate>, CoreError> {
    let mut ordered = Vec::with_capacity(requested.len());
    for id in dedup_ids(requested) {
        let template = found
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "PredefinedMilestone",
                id,
            })?;
        ordered.push(template);
    }
    Ok(ordered)
}

/// Merge predefined and custom milestones into one allocated set.
///
/// Templates come first in the given order, then customs. A custom
/// milestone whose title matches a template (trimmed, case-insensitive)
/// overrides that template's description, requirements, and target date
/// instead of being appended.
pub fn merge_milestones(
    templates: &[MilestoneTemplate],
    customs: &[CustomMilestone],
    funding_target: Amount,
) -> Result<Vec<MilestoneDraft>, CoreError> {
    let mut merged: Vec<MilestoneDraft> = templates
        .iter()
        .map(|t| MilestoneDraft {
            predefined_milestone_id: Some(t.id),
            title: t.title.trim().to_string(),
            description: t.description.clone(),
            requirements: t.requirements.clone(),
            target_date: None,
            sort_order: 0,
            fund_percentage: 0.0,
        })
        .collect();

    for custom in customs {
        let key = title_key(&custom.title);
        if key.is_empty() {
            return Err(CoreError::Validation(
                "Custom milestone title must not be empty".into(),
            ));
        }
        let existing = merged
            .iter_mut()
            .find(|m| m.predefined_milestone_id.is_some() && title_key(&m.title) == key);
        match existing {
            Some(slot) => {
                if custom.description.is_some() {
                    slot.description = custom.description.clone();
                }
                if !custom.requirements.is_empty() {
                    slot.requirements = custom.requirements.clone();
                }
                slot.target_date = custom.target_date.or(slot.target_date);
            }
            None => {
                if merged.iter().any(|m| title_key(&m.title) == key) {
                    return Err(CoreError::Validation(format!(
                        "Duplicate milestone title '{}'",
                        custom.title.trim()
                    )));
                }
                merged.push(MilestoneDraft {
                    predefined_milestone_id: None,
                    title: custom.title.trim().to_string(),
                    description: custom.description.clone(),
                    requirements: custom.requirements.clone(),
                    target_date: custom.target_date,
                    sort_order: 0,
                    fund_percentage: 0.0,
                });
            }
        }
    }

    if merged.is_empty() {
        return Err(CoreError::Validation(
            "At least one milestone is required".into(),
        ));
    }
    if merged.len() > MAX_MILESTONES {
        return Err(CoreError::Validation(format!(
            "A campaign can have at most {MAX_MILESTONES} milestones"
        )));
    }

    let allocation = allocate_funds(funding_target, merged.len());
    for (index, milestone) in merged.iter_mut().enumerate() {
        milestone.requirements = clean_requirements(&milestone.title, &milestone.requirements)?;
        if milestone.title.chars().count() > MAX_TITLE_LEN {
            return Err(CoreError::Validation(format!(
                "Milestone title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        milestone.sort_order = index as i32;
        milestone.fund_percentage = allocation;
    }

    Ok(merged)
}

/// Allocation carried by each milestone: `funding_target / count`.
///
/// Returns 0 for an empty set.
pub fn allocate_funds(funding_target: Amount, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    funding_target as f64 / count as f64
}

/// Trim requirements, drop blanks, and enforce the per-milestone bounds.
pub fn clean_requirements(title: &str, requirements: &[String]) -> Result<Vec<String>, CoreError> {
    let cleaned: Vec<String> = requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        return Err(CoreError::Validation(format!(
            "Milestone '{title}' needs at least one requirement"
        )));
    }
    if cleaned.len() > MAX_REQUIREMENTS {
        return Err(CoreError::Validation(format!(
            "Milestone '{title}' can have at most {MAX_REQUIREMENTS} requirements"
        )));
    }
    Ok(cleaned)
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress status derived from requirement completion counts.
pub fn progress_status(completed: i64, total: i64) -> &'static str {
    if total > 0 && completed >= total {
        PROGRESS_COMPLETED
    } else if completed > 0 {
        PROGRESS_IN_PROGRESS
    } else {
        PROGRESS_NOT_STARTED
    }
}

/// Approval status after the founder changes a milestone's requirements.
///
/// A rejected milestone goes back into the admin queue once the founder
/// reworks it.
pub fn approval_after_progress_change(current: &str) -> &str {
    if current == APPROVAL_REJECTED {
        APPROVAL_PENDING
    } else {
        current
    }
}

/// Check that requirement completion may be changed.
pub fn validate_requirement_toggle(
    campaign_status: &str,
    approval_status: &str,
) -> Result<(), CoreError> {
    if campaign_status != STATUS_LIVE && campaign_status != STATUS_FUNDED {
        return Err(CoreError::Conflict(format!(
            "Requirements can only be updated on live or funded campaigns (current status '{campaign_status}')"
        )));
    }
    if approval_status == APPROVAL_APPROVED {
        return Err(CoreError::Conflict(
            "Milestone is already approved".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin review
// ---------------------------------------------------------------------------

/// Current state of a milestone under admin review.
#[derive(Debug, Clone, Copy)]
pub struct ReviewTarget<'a> {
    pub campaign_status: &'a str,
    pub progress_status: &'a str,
    pub approval_status: &'a str,
}

/// Validate an admin approve/reject decision for a milestone.
///
/// Approval releases funds, so it is only possible once every requirement
/// is complete, and it is final.
pub fn validate_review(
    decision: &str,
    reason: Option<&str>,
    target: &ReviewTarget<'_>,
) -> Result<(), CoreError> {
    if !VALID_REVIEW_DECISIONS.contains(&decision) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{decision}'. Must be one of: {}",
            VALID_REVIEW_DECISIONS.join(", ")
        )));
    }
    if ![STATUS_LIVE, STATUS_FUNDED, STATUS_CLOSED].contains(&target.campaign_status) {
        return Err(CoreError::Conflict(format!(
            "Milestones of a '{}' campaign cannot be reviewed",
            target.campaign_status
        )));
    }
    if target.approval_status == APPROVAL_APPROVED {
        return Err(CoreError::Conflict(
            "Milestone is already approved".into(),
        ));
    }
    if decision == APPROVAL_REJECTED {
        if reason.map(str::trim).unwrap_or_default().is_empty() {
            return Err(CoreError::Validation(
                "A rejection reason is required".into(),
            ));
        }
        return Ok(());
    }
    if target.progress_status != PROGRESS_COMPLETED {
        return Err(CoreError::Conflict(
            "All milestone requirements must be completed before approval".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn template(id: DbId, title: &str) -> MilestoneTemplate {
        MilestoneTemplate {
            id,
            title: title.to_string(),
            description: Some(format!("{title} description")),
            requirements: vec![format!("{title} requirement")],
        }
    }

    fn custom(title: &str, requirements: &[&str]) -> CustomMilestone {
        CustomMilestone {
            title: title.to_string(),
            description: None,
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            target_date: None,
        }
    }

    // -- merge ---------------------------------------------------------------

    #[test]
    fn predefined_come_before_custom() {
        let merged = merge_milestones(
            &[template(1, "MVP"), template(2, "Launch")],
            &[custom("Hire CTO", &["Sign offer"])],
            90_000,
        )
        .unwrap();

        let titles: Vec<_> = merged.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["MVP", "Launch", "Hire CTO"]);
        assert_eq!(merged[0].predefined_milestone_id, Some(1));
        assert_eq!(merged[2].predefined_milestone_id, None);
        let orders: Vec<_> = merged.iter().map(|m| m.sort_order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn every_milestone_gets_equal_allocation() {
        let merged = merge_milestones(
            &[template(1, "MVP")],
            &[custom("Beta", &["Ship"]), custom("GA", &["Ship"])],
            90_000,
        )
        .unwrap();
        assert!(merged.iter().all(|m| (m.fund_percentage - 30_000.0).abs() < 1e-9));
    }

    #[test]
    fn custom_with_template_title_overrides_template() {
        let mut override_mvp = custom("  mvp ", &["Deploy to staging", "User test"]);
        override_mvp.description = Some("Our MVP".into());
        override_mvp.target_date = NaiveDate::from_ymd_opt(2027, 1, 15);

        let merged = merge_milestones(&[template(7, "MVP")], &[override_mvp], 10_000).unwrap();

        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.predefined_milestone_id, Some(7));
        assert_eq!(m.title, "MVP");
        assert_eq!(m.description.as_deref(), Some("Our MVP"));
        assert_eq!(m.requirements, ["Deploy to staging", "User test"]);
        assert_eq!(m.target_date, NaiveDate::from_ymd_opt(2027, 1, 15));
        assert_eq!(m.fund_percentage, 10_000.0);
    }

    #[test]
    fn override_without_requirements_keeps_template_requirements() {
        let merged =
            merge_milestones(&[template(7, "MVP")], &[custom("MVP", &[])], 10_000).unwrap();
        assert_eq!(merged[0].requirements, ["MVP requirement"]);
    }

    #[test]
    fn duplicate_custom_titles_rejected() {
        let result = merge_milestones(
            &[],
            &[custom("Beta", &["a"]), custom("beta", &["b"])],
            1_000,
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("Duplicate"));
    }

    #[test]
    fn empty_set_rejected() {
        assert_matches!(merge_milestones(&[], &[], 1_000), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_custom_title_rejected() {
        assert!(merge_milestones(&[], &[custom("  ", &["x"])], 1_000).is_err());
    }

    #[test]
    fn milestone_without_requirements_rejected() {
        let result = merge_milestones(&[], &[custom("Beta", &["  ", ""])], 1_000);
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("requirement"));
    }

    #[test]
    fn requirements_are_trimmed() {
        let merged = merge_milestones(&[], &[custom("Beta", &["  ship it  ", ""])], 1_000).unwrap();
        assert_eq!(merged[0].requirements, ["ship it"]);
    }

    #[test]
    fn too_many_milestones_rejected() {
        let customs: Vec<_> = (0..=MAX_MILESTONES)
            .map(|i| custom(&format!("M{i}"), &["r"]))
            .collect();
        assert!(merge_milestones(&[], &customs, 1_000).is_err());
    }

    // -- template ordering ---------------------------------------------------

    #[test]
    fn dedup_keeps_first_seen_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), [3, 1, 2]);
    }

    #[test]
    fn order_templates_follows_request() {
        let ordered =
            order_templates(&[2, 1, 2], vec![template(1, "A"), template(2, "B")]).unwrap();
        let ids: Vec<_> = ordered.iter().map(|t| t.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn order_templates_reports_missing_id() {
        let result = order_templates(&[1, 9], vec![template(1, "A")]);
        assert_matches!(result, Err(CoreError::NotFound { id: 9, .. }));
    }

    // -- allocation ----------------------------------------------------------

    #[test]
    fn allocation_divides_target() {
        assert_eq!(allocate_funds(100_000, 4), 25_000.0);
        assert!((allocate_funds(100, 3) - 33.333_333_333).abs() < 1e-6);
        assert_eq!(allocate_funds(100, 0), 0.0);
    }

    // -- progress ------------------------------------------------------------

    #[test]
    fn progress_status_from_counts() {
        assert_eq!(progress_status(0, 3), PROGRESS_NOT_STARTED);
        assert_eq!(progress_status(1, 3), PROGRESS_IN_PROGRESS);
        assert_eq!(progress_status(3, 3), PROGRESS_COMPLETED);
        assert_eq!(progress_status(0, 0), PROGRESS_NOT_STARTED);
    }

    #[test]
    fn rejected_milestone_returns_to_pending() {
        assert_eq!(approval_after_progress_change(APPROVAL_REJECTED), APPROVAL_PENDING);
        assert_eq!(approval_after_progress_change(APPROVAL_PENDING), APPROVAL_PENDING);
    }

    #[test]
    fn toggle_requires_live_campaign_and_unapproved_milestone() {
        assert!(validate_requirement_toggle(STATUS_LIVE, APPROVAL_PENDING).is_ok());
        assert!(validate_requirement_toggle(STATUS_FUNDED, APPROVAL_REJECTED).is_ok());
        assert_matches!(
            validate_requirement_toggle("draft", APPROVAL_PENDING),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_requirement_toggle(STATUS_LIVE, APPROVAL_APPROVED),
            Err(CoreError::Conflict(_))
        );
    }

    // -- review --------------------------------------------------------------

    fn target(progress: &'static str, approval: &'static str) -> ReviewTarget<'static> {
        ReviewTarget {
            campaign_status: STATUS_LIVE,
            progress_status: progress,
            approval_status: approval,
        }
    }

    #[test]
    fn approve_completed_milestone() {
        let t = target(PROGRESS_COMPLETED, APPROVAL_PENDING);
        assert!(validate_review(APPROVAL_APPROVED, None, &t).is_ok());
    }

    #[test]
    fn approve_incomplete_milestone_conflicts() {
        let t = target(PROGRESS_IN_PROGRESS, APPROVAL_PENDING);
        assert_matches!(
            validate_review(APPROVAL_APPROVED, None, &t),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn approved_milestone_is_final() {
        let t = target(PROGRESS_COMPLETED, APPROVAL_APPROVED);
        assert_matches!(
            validate_review(APPROVAL_REJECTED, Some("changed my mind"), &t),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn reject_requires_reason() {
        let t = target(PROGRESS_IN_PROGRESS, APPROVAL_PENDING);
        assert_matches!(
            validate_review(APPROVAL_REJECTED, None, &t),
            Err(CoreError::Validation(_))
        );
        assert!(validate_review(APPROVAL_REJECTED, Some("No evidence"), &t).is_ok());
    }

    #[test]
    fn review_of_draft_campaign_conflicts() {
        let t = ReviewTarget {
            campaign_status: "draft",
            progress_status: PROGRESS_COMPLETED,
            approval_status: APPROVAL_PENDING,
        };
        assert_matches!(
            validate_review(APPROVAL_APPROVED, None, &t),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn unknown_decision_rejected() {
        let t = target(PROGRESS_COMPLETED, APPROVAL_PENDING);
        assert_matches!(
            validate_review("pending", None, &t),
            Err(CoreError::Validation(_))
        );
    }
}
