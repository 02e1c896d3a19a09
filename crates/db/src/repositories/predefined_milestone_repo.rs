//! Repository for the `predefined_milestones` table.

use sqlx::PgPool;
use raisehub_core::types::DbId;

use crate::models::milestone::{
    CreatePredefinedMilestone, PredefinedMilestone, UpdatePredefinedMilestone,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, requirements, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for milestone templates.
pub struct PredefinedMilestoneRepo;

impl PredefinedMilestoneRepo {
    /// Insert a new template.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePredefinedMilestone,
    ) -> Result<PredefinedMilestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO predefined_milestones (title, description, requirements, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PredefinedMilestone>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List templates ordered for display, optionally including inactive ones.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<PredefinedMilestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predefined_milestones
             WHERE ($1 OR is_active)
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, PredefinedMilestone>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Fetch the active templates among `ids`, in arbitrary order.
    pub async fn find_active_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<PredefinedMilestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predefined_milestones WHERE id = ANY($1) AND is_active"
        );
        sqlx::query_as::<_, PredefinedMilestone>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePredefinedMilestone,
    ) -> Result<Option<PredefinedMilestone>, sqlx::Error> {
        let query = format!(
            "UPDATE predefined_milestones SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                sort_order = COALESCE($5, sort_order),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PredefinedMilestone>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a template. Campaign milestones keep their copy.
    /// Returns `true` if an active row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE predefined_milestones SET is_active = FALSE WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
