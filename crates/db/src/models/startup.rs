//! Startup entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use raisehub_core::types::{DbId, Timestamp};

/// A startup row from the `startups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Startup {
    pub id: DbId,
    pub founder_id: DbId,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub industry: String,
    pub stage: String,
    pub website_url: Option<String>,
    pub founded_year: Option<i32>,
    pub team_size: Option<i32>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a startup. `founder_id` comes from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStartup {
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub industry: String,
    pub stage: String,
    pub website_url: Option<String>,
    pub founded_year: Option<i32>,
    pub team_size: Option<i32>,
}

/// DTO for updating a startup. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStartup {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub stage: Option<String>,
    pub website_url: Option<String>,
    pub founded_year: Option<i32>,
    pub team_size: Option<i32>,
}

/// Filters for the public startup listing. Values are pre-normalized.
#[derive(Debug, Clone, Default)]
pub struct StartupFilter {
    pub industry: Option<String>,
    pub stage: Option<String>,
    /// `ILIKE` pattern matched against name and tagline.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
