//! Milestone models: predefined templates, campaign milestones, requirements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use raisehub_core::error::CoreError;
use raisehub_core::milestone::MilestoneTemplate;
use raisehub_core::types::{DbId, Timestamp};

/// An admin-curated milestone template from `predefined_milestones`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PredefinedMilestone {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PredefinedMilestone> for MilestoneTemplate {
    fn from(p: PredefinedMilestone) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            requirements: p.requirements,
        }
    }
}

/// DTO for creating a predefined milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePredefinedMilestone {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a predefined milestone. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePredefinedMilestone {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A row from `campaign_milestones`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignMilestone {
    pub id: DbId,
    pub campaign_id: DbId,
    pub predefined_milestone_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub sort_order: i32,
    pub fund_percentage: f64,
    pub status: String,
    pub admin_approval_status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `milestone_requirements`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MilestoneRequirement {
    pub id: DbId,
    pub milestone_id: DbId,
    pub description: String,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub sort_order: i32,
}

/// A campaign milestone together with its requirements.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneWithRequirements {
    #[serde(flatten)]
    pub milestone: CampaignMilestone,
    pub requirements: Vec<MilestoneRequirement>,
}

/// Outcome of toggling one milestone requirement.
#[derive(Debug)]
pub enum RequirementToggle {
    /// The requirement changed; carries the recomputed milestone.
    Updated(MilestoneWithRequirements),
    /// The milestone or requirement does not exist, or they do not belong together.
    NotFound,
    /// The milestone or its campaign no longer accepts progress changes.
    Refused(CoreError),
}
