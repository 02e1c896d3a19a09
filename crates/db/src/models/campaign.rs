//! Campaign entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use raisehub_core::types::{Amount, DbId, Timestamp};

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub startup_id: DbId,
    pub founder_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub funding_target: Amount,
    pub min_investment: Amount,
    pub equity_offered: f64,
    pub deadline: Timestamp,
    pub pitch: Option<String>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub market: Option<String>,
    pub use_of_funds: Option<String>,
    pub pitch_video_url: Option<String>,
    pub status: String,
    pub current_step: i16,
    pub rejection_reason: Option<String>,
    pub raised_amount: Amount,
    pub investor_count: i32,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Campaign {
    /// Whether step 2 (the story) has been saved.
    pub fn has_story(&self) -> bool {
        self.pitch.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Step 1 request body: the campaign's basic details.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignBasics {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub funding_target: Amount,
    pub min_investment: Amount,
    pub equity_offered: f64,
    pub deadline: Timestamp,
}

/// DTO for inserting a new draft campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaign {
    pub startup_id: DbId,
    pub founder_id: DbId,
    pub basics: CampaignBasics,
}

/// Step 2 request body: the campaign story.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignStory {
    pub pitch: String,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub market: Option<String>,
    pub use_of_funds: Option<String>,
    pub pitch_video_url: Option<String>,
}

/// Filters for campaign listings. Values are pre-normalized.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    /// Restrict to these statuses; empty means any status.
    pub statuses: Vec<String>,
    pub category: Option<String>,
    /// `ILIKE` pattern matched against title and description.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
