//! Repository for the `profiles` table.

use sqlx::PgPool;
use raisehub_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, bio, location, linkedin_url, website_url, avatar_url, \
    wallet_address, investment_focus, min_ticket, max_ticket, updated_at";

/// Provides read/update operations for profiles. Rows are created with the user.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile of a user.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                bio = COALESCE($2, bio),
                location = COALESCE($3, location),
                linkedin_url = COALESCE($4, linkedin_url),
                website_url = COALESCE($5, website_url),
                avatar_url = COALESCE($6, avatar_url),
                wallet_address = COALESCE($7, wallet_address),
                investment_focus = COALESCE($8, investment_focus),
                min_ticket = COALESCE($9, min_ticket),
                max_ticket = COALESCE($10, max_ticket)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.location)
            .bind(&input.linkedin_url)
            .bind(&input.website_url)
            .bind(&input.avatar_url)
            .bind(&input.wallet_address)
            .bind(&input.investment_focus)
            .bind(input.min_ticket)
            .bind(input.max_ticket)
            .fetch_optional(pool)
            .await
    }
}
