//! Profile model: the per-user public details shown on the marketplace.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use raisehub_core::types::{Amount, DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub wallet_address: Option<String>,
    pub investment_focus: Vec<String>,
    pub min_ticket: Option<Amount>,
    pub max_ticket: Option<Amount>,
    pub updated_at: Timestamp,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub wallet_address: Option<String>,
    pub investment_focus: Option<Vec<String>>,
    pub min_ticket: Option<Amount>,
    pub max_ticket: Option<Amount>,
}
