//! Campaign lifecycle: statuses, creation steps, and review transitions.
//!
//! A campaign is built in steps by its founder (basics, story, milestones),
//! submitted for review, and then approved (goes live) or rejected by an
//! admin. Rejected campaigns are editable again and can be resubmitted.

use crate::error::CoreError;
use crate::types::{Amount, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_UNDER_REVIEW: &str = "under_review";
pub const STATUS_LIVE: &str = "live";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_FUNDED: &str = "funded";
pub const STATUS_CLOSED: &str = "closed";

/// All valid campaign statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_UNDER_REVIEW,
    STATUS_LIVE,
    STATUS_REJECTED,
    STATUS_FUNDED,
    STATUS_CLOSED,
];

/// Statuses visible to investors and the public.
pub const PUBLIC_STATUSES: &[&str] = &[STATUS_LIVE, STATUS_FUNDED, STATUS_CLOSED];

/// Statuses that count against the one-open-campaign-per-startup rule.
pub const OPEN_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_UNDER_REVIEW,
    STATUS_LIVE,
    STATUS_REJECTED,
];

/// Statuses in which the founder may still edit the campaign.
pub const EDITABLE_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_REJECTED];

/// Statuses from which a founder may close the campaign.
pub const CLOSABLE_STATUSES: &[&str] = &[STATUS_LIVE, STATUS_FUNDED];

// ---------------------------------------------------------------------------
// Creation steps
// ---------------------------------------------------------------------------

pub const STEP_BASICS: i16 = 1;
pub const STEP_STORY: i16 = 2;
pub const STEP_MILESTONES: i16 = 3;
pub const STEP_SUBMITTED: i16 = 4;

// ---------------------------------------------------------------------------
// Review decisions
// ---------------------------------------------------------------------------

pub const DECISION_APPROVE: &str = "approve";
pub const DECISION_REJECT: &str = "reject";

/// Maximum length of a campaign title.
pub const MAX_TITLE_LEN: usize = 150;

/// Maximum length of each story section.
pub const MAX_STORY_SECTION_LEN: usize = 10_000;

/// Step 1 fields, borrowed from whatever DTO carries them.
#[derive(Debug, Clone, Copy)]
pub struct BasicsInput<'a> {
    pub title: &'a str,
    pub funding_target: Amount,
    pub min_investment: Amount,
    pub equity_offered: f64,
    pub deadline: Timestamp,
}

/// Step 2 fields. Only the pitch is mandatory.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryInput<'a> {
    pub pitch: &'a str,
    pub problem: Option<&'a str>,
    pub solution: Option<&'a str>,
    pub market: Option<&'a str>,
    pub use_of_funds: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Status predicates
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid campaign status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Whether the founder may still change basics, story, or milestones.
pub fn is_editable(status: &str) -> bool {
    EDITABLE_STATUSES.contains(&status)
}

/// Whether the campaign blocks its startup from opening another one.
pub fn is_open(status: &str) -> bool {
    OPEN_STATUSES.contains(&status)
}

/// Whether investors can see the campaign.
pub fn is_public(status: &str) -> bool {
    PUBLIC_STATUSES.contains(&status)
}

/// Reject edits to a campaign that has left the editable states.
pub fn ensure_editable(status: &str) -> Result<(), CoreError> {
    if is_editable(status) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Campaign cannot be edited while '{status}'"
        )))
    }
}

/// Whether a founder may close the campaign.
pub fn can_close(status: &str) -> bool {
    CLOSABLE_STATUSES.contains(&status)
}

// ---------------------------------------------------------------------------
// Step validation
// ---------------------------------------------------------------------------

/// Validate step 1 (basic details).
pub fn validate_basics(input: &BasicsInput<'_>, now: Timestamp) -> Result<(), CoreError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if input.funding_target <= 0 {
        return Err(CoreError::Validation(
            "Funding target must be greater than zero".into(),
        ));
    }
    if input.min_investment <= 0 {
        return Err(CoreError::Validation(
            "Minimum investment must be greater than zero".into(),
        ));
    }
    if input.min_investment > input.funding_target {
        return Err(CoreError::Validation(
            "Minimum investment cannot exceed the funding target".into(),
        ));
    }
    if !(input.equity_offered > 0.0 && input.equity_offered <= 100.0) {
        return Err(CoreError::Validation(
            "Equity offered must be greater than 0 and at most 100 percent".into(),
        ));
    }
    if input.deadline <= now {
        return Err(CoreError::Validation(
            "Deadline must be in the future".into(),
        ));
    }
    Ok(())
}

/// Validate step 2 (campaign story).
pub fn validate_story(input: &StoryInput<'_>) -> Result<(), CoreError> {
    if input.pitch.trim().is_empty() {
        return Err(CoreError::Validation("Pitch must not be empty".into()));
    }
    let sections = [
        ("pitch", Some(input.pitch)),
        ("problem", input.problem),
        ("solution", input.solution),
        ("market", input.market),
        ("use_of_funds", input.use_of_funds),
    ];
    for (name, text) in sections {
        if text.is_some_and(|t| t.len() > MAX_STORY_SECTION_LEN) {
            return Err(CoreError::Validation(format!(
                "'{name}' must be at most {MAX_STORY_SECTION_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Compute the step pointer after `completed` has been saved.
///
/// The pointer never moves backwards, so re-saving an earlier step keeps
/// the founder where they were.
pub fn advance_step(current: i16, completed: i16) -> i16 {
    current.max(completed + 1).min(STEP_SUBMITTED)
}

/// Check that every step is complete before submission for review.
pub fn check_ready_for_review(has_story: bool, milestone_count: i64) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    if !has_story {
        missing.push("campaign story");
    }
    if milestone_count == 0 {
        missing.push("milestones");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Campaign is incomplete. Missing: {}",
            missing.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Admin review
// ---------------------------------------------------------------------------

/// Compute the status an admin review moves a campaign into.
///
/// Only campaigns `under_review` can be reviewed. Rejections must carry a
/// reason so the founder knows what to fix.
pub fn review_transition(
    status: &str,
    decision: &str,
    reason: Option<&str>,
) -> Result<&'static str, CoreError> {
    if status != STATUS_UNDER_REVIEW {
        return Err(CoreError::Conflict(format!(
            "Only campaigns under review can be reviewed (current status '{status}')"
        )));
    }
    match decision {
        DECISION_APPROVE => Ok(STATUS_LIVE),
        DECISION_REJECT => {
            if reason.map(str::trim).unwrap_or_default().is_empty() {
                return Err(CoreError::Validation(
                    "A rejection reason is required".into(),
                ));
            }
            Ok(STATUS_REJECTED)
        }
        other => Err(CoreError::Validation(format!(
            "Invalid decision '{other}'. Must be one of: {DECISION_APPROVE}, {DECISION_REJECT}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
