//! Repository for the `campaigns` table.

use sqlx::{PgConnection, PgPool};
use raisehub_core::campaign::{
    CLOSABLE_STATUSES, EDITABLE_STATUSES, OPEN_STATUSES, STATUS_CLOSED, STATUS_LIVE,
    STATUS_UNDER_REVIEW, STEP_SUBMITTED,
};
use raisehub_core::types::{Amount, DbId};

use crate::models::campaign::{
    Campaign, CampaignBasics, CampaignFilter, CampaignStory, CreateCampaign,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, startup_id, founder_id, title, description, category, \
    funding_target, min_investment, equity_offered, deadline, pitch, problem, solution, \
    market, use_of_funds, pitch_video_url, status, current_step, rejection_reason, \
    raised_amount, investor_count, submitted_at, approved_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new draft campaign (step 1 saved, pointer on step 2).
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let b = &input.basics;
        let query = format!(
            "INSERT INTO campaigns
                (startup_id, founder_id, title, description, category,
                 funding_target, min_investment, equity_offered, deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(input.startup_id)
            .bind(input.founder_id)
            .bind(b.title.trim())
            .bind(&b.description)
            .bind(b.category.trim().to_lowercase())
            .bind(b.funding_target)
            .bind(b.min_investment)
            .bind(b.equity_offered)
            .bind(b.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a campaign by ID only if it belongs to `founder_id`.
    pub async fn find_for_founder(
        pool: &PgPool,
        id: DbId,
        founder_id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 AND founder_id = $2");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(founder_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the startup's open campaign, if any (draft, under review, live, or rejected).
    pub async fn find_open_for_startup(
        pool: &PgPool,
        startup_id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE startup_id = $1 AND status = ANY($2)
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(startup_id)
            .bind(OPEN_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// List a founder's campaigns, newest first.
    pub async fn list_by_founder(
        pool: &PgPool,
        founder_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns WHERE founder_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(founder_id)
            .fetch_all(pool)
            .await
    }

    /// List campaigns matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &CampaignFilter) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE (cardinality($1::text[]) = 0 OR status = ANY($1))
               AND ($2::text IS NULL OR LOWER(category) = $2)
               AND ($3::text IS NULL OR title ILIKE $3 OR description ILIKE $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&filter.statuses)
            .bind(&filter.category)
            .bind(&filter.search)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Replace the basic details (step 1) of a campaign.
    ///
    /// Returns `None` unless the campaign is still editable.
    pub async fn update_basics(
        conn: &mut PgConnection,
        id: DbId,
        basics: &CampaignBasics,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                title = $2,
                description = $3,
                category = $4,
                funding_target = $5,
                min_investment = $6,
                equity_offered = $7,
                deadline = $8
             WHERE id = $1 AND status = ANY($9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(basics.title.trim())
            .bind(&basics.description)
            .bind(basics.category.trim().to_lowercase())
            .bind(basics.funding_target)
            .bind(basics.min_investment)
            .bind(basics.equity_offered)
            .bind(basics.deadline)
            .bind(EDITABLE_STATUSES)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Save the story (step 2) and move the step pointer.
    ///
    /// Returns `None` unless the campaign is still editable.
    pub async fn save_story(
        pool: &PgPool,
        id: DbId,
        story: &CampaignStory,
        current_step: i16,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                pitch = $2,
                problem = $3,
                solution = $4,
                market = $5,
                use_of_funds = $6,
                pitch_video_url = $7,
                current_step = $8
             WHERE id = $1 AND status = ANY($9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(story.pitch.trim())
            .bind(&story.problem)
            .bind(&story.solution)
            .bind(&story.market)
            .bind(&story.use_of_funds)
            .bind(&story.pitch_video_url)
            .bind(current_step)
            .bind(EDITABLE_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// Move the step pointer.
    pub async fn set_step(
        conn: &mut PgConnection,
        id: DbId,
        current_step: i16,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE campaigns SET current_step = $2 WHERE id = $1")
            .bind(id)
            .bind(current_step)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Move a campaign into the admin review queue, clearing any previous rejection.
    ///
    /// Returns `None` unless the campaign is still editable.
    pub async fn submit_for_review(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                status = $2,
                current_step = $3,
                rejection_reason = NULL,
                submitted_at = NOW()
             WHERE id = $1 AND status = ANY($4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(STATUS_UNDER_REVIEW)
            .bind(STEP_SUBMITTED)
            .bind(EDITABLE_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// Apply an admin review outcome.
    ///
    /// Going live stamps `approved_at`; a rejection stores the reason.
    /// Returns `None` unless the campaign is under review.
    pub async fn apply_review(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        reason: Option<&str>,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                status = $2,
                rejection_reason = $3,
                approved_at = CASE WHEN $2 = $4 THEN NOW() ELSE approved_at END
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(new_status)
            .bind(reason)
            .bind(STATUS_LIVE)
            .bind(STATUS_UNDER_REVIEW)
            .fetch_optional(pool)
            .await
    }

    /// Close a campaign to further activity.
    ///
    /// Returns `None` unless the campaign is live or funded.
    pub async fn close(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET status = $2 WHERE id = $1 AND status = ANY($3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(STATUS_CLOSED)
            .bind(CLOSABLE_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// Lock a campaign row for the rest of the transaction.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Add an investment to the campaign totals.
    ///
    /// Must run in the same transaction as the investment insert so the
    /// distinct-investor count includes it.
    pub async fn record_investment(
        conn: &mut PgConnection,
        id: DbId,
        amount: Amount,
        new_status: &str,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                raised_amount = raised_amount + $2,
                investor_count = (
                    SELECT COUNT(DISTINCT investor_id)::int FROM investments WHERE campaign_id = $1
                ),
                status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(amount)
            .bind(new_status)
            .fetch_one(&mut *conn)
            .await
    }
}
