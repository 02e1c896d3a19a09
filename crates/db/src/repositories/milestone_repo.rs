//! Repository for `campaign_milestones` and `milestone_requirements`.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use raisehub_core::campaign::{advance_step, is_editable, STEP_MILESTONES};
use raisehub_core::milestone::{
    allocate_funds, approval_after_progress_change, progress_status,
    validate_requirement_toggle, MilestoneDraft, APPROVAL_APPROVED, APPROVAL_PENDING,
    APPROVAL_REJECTED, PROGRESS_COMPLETED,
};
use raisehub_core::types::{Amount, DbId};

use crate::models::milestone::{
    CampaignMilestone, MilestoneRequirement, MilestoneWithRequirements, RequirementToggle,
};
use crate::repositories::CampaignRepo;

/// Column list for the `campaign_milestones` table.
const COLUMNS: &str = "id, campaign_id, predefined_milestone_id, title, description, \
    target_date, sort_order, fund_percentage, status, admin_approval_status, \
    rejection_reason, reviewed_by, reviewed_at, completed_at, created_at, updated_at";

/// Column list for the `milestone_requirements` table.
const REQUIREMENT_COLUMNS: &str =
    "id, milestone_id, description, is_completed, completed_at, sort_order";

/// Provides milestone set replacement, progress tracking, and review updates.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// List a campaign's milestones in display order, each with its requirements.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<MilestoneWithRequirements>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_for_campaign_inner(&mut *conn, campaign_id).await
    }

    /// Count the milestones of a campaign.
    pub async fn count_for_campaign(pool: &PgPool, campaign_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM campaign_milestones WHERE campaign_id = $1")
                .bind(campaign_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Replace the whole milestone set of a campaign in one transaction.
    ///
    /// The campaign row is locked first and must still be editable;
    /// otherwise nothing changes and `None` is returned. Existing milestones
    /// (and their requirements, via cascade) are deleted, the drafts inserted
    /// in order, and the step pointer moved past step 3.
    pub async fn replace_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        drafts: &[MilestoneDraft],
    ) -> Result<Option<Vec<MilestoneWithRequirements>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(String, i16)> = sqlx::query_as(
            "SELECT status, current_step FROM campaigns WHERE id = $1 FOR UPDATE",
        )
        .bind(campaign_id)
        .fetch_optional(&mut *tx)
        .await?;
        let current_step = match locked {
            Some((status, step)) if is_editable(&status) => step,
            _ => return Ok(None),
        };

        sqlx::query("DELETE FROM campaign_milestones WHERE campaign_id = $1")
            .bind(campaign_id)
            .execute(&mut *tx)
            .await?;

        for draft in drafts {
            let (milestone_id,): (DbId,) = sqlx::query_as(
                "INSERT INTO campaign_milestones
                    (campaign_id, predefined_milestone_id, title, description,
                     target_date, sort_order, fund_percentage)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING id",
            )
            .bind(campaign_id)
            .bind(draft.predefined_milestone_id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.target_date)
            .bind(draft.sort_order)
            .bind(draft.fund_percentage)
            .fetch_one(&mut *tx)
            .await?;

            let orders: Vec<i32> = (0..draft.requirements.len() as i32).collect();
            sqlx::query(
                "INSERT INTO milestone_requirements (milestone_id, description, sort_order)
                 SELECT $1, d, o FROM UNNEST($2::text[], $3::int[]) AS t(d, o)",
            )
            .bind(milestone_id)
            .bind(&draft.requirements)
            .bind(&orders)
            .execute(&mut *tx)
            .await?;
        }

        let next_step = advance_step(current_step, STEP_MILESTONES);
        if next_step != current_step {
            CampaignRepo::set_step(&mut *tx, campaign_id, next_step).await?;
        }

        let milestones = Self::list_for_campaign_inner(&mut *tx, campaign_id).await?;
        tx.commit().await?;

        tracing::debug!(campaign_id, count = milestones.len(), "Milestone set replaced");
        Ok(Some(milestones))
    }

    /// Re-apply the allocation after the funding target changed.
    ///
    /// Runs on the caller's connection so it commits together with the
    /// target change.
    pub async fn reallocate(
        conn: &mut PgConnection,
        campaign_id: DbId,
        funding_target: Amount,
    ) -> Result<(), sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM campaign_milestones WHERE campaign_id = $1")
                .bind(campaign_id)
                .fetch_one(&mut *conn)
                .await?;
        sqlx::query("UPDATE campaign_milestones SET fund_percentage = $2 WHERE campaign_id = $1")
            .bind(campaign_id)
            .bind(allocate_funds(funding_target, count as usize))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Find a milestone only if it belongs to `campaign_id`.
    pub async fn find_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        milestone_id: DbId,
    ) -> Result<Option<CampaignMilestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_milestones WHERE id = $1 AND campaign_id = $2"
        );
        sqlx::query_as::<_, CampaignMilestone>(&query)
            .bind(milestone_id)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a requirement complete or incomplete and recompute the milestone.
    ///
    /// The milestone row is locked before anything is read, so concurrent
    /// toggles on the same milestone count each other's changes. The toggle
    /// rules are checked under that lock. The progress status follows the
    /// completion counts, and a rejected milestone returns to `pending`.
    pub async fn set_requirement_completion(
        pool: &PgPool,
        milestone_id: DbId,
        requirement_id: DbId,
        completed: bool,
    ) -> Result<RequirementToggle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(String, String)> = sqlx::query_as(
            "SELECT m.admin_approval_status, c.status
             FROM campaign_milestones m
             JOIN campaigns c ON c.id = m.campaign_id
             WHERE m.id = $1
             FOR UPDATE OF m",
        )
        .bind(milestone_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((current_approval, campaign_status)) = locked else {
            return Ok(RequirementToggle::NotFound);
        };
        if let Err(refusal) = validate_requirement_toggle(&campaign_status, &current_approval) {
            return Ok(RequirementToggle::Refused(refusal));
        }

        let updated = sqlx::query(
            "UPDATE milestone_requirements SET
                is_completed = $3,
                completed_at = CASE WHEN $3 THEN COALESCE(completed_at, NOW()) ELSE NULL END
             WHERE id = $1 AND milestone_id = $2",
        )
        .bind(requirement_id)
        .bind(milestone_id)
        .bind(completed)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Ok(RequirementToggle::NotFound);
        }

        let (done, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_completed), COUNT(*)
             FROM milestone_requirements WHERE milestone_id = $1",
        )
        .bind(milestone_id)
        .fetch_one(&mut *tx)
        .await?;

        let status = progress_status(done, total);
        let approval = approval_after_progress_change(&current_approval);
        let query = format!(
            "UPDATE campaign_milestones SET
                status = $2,
                completed_at = CASE WHEN $2 = $4 THEN COALESCE(completed_at, NOW()) ELSE NULL END,
                admin_approval_status = $3,
                rejection_reason = CASE WHEN $3 = $5 THEN NULL ELSE rejection_reason END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let milestone = sqlx::query_as::<_, CampaignMilestone>(&query)
            .bind(milestone_id)
            .bind(status)
            .bind(approval)
            .bind(PROGRESS_COMPLETED)
            .bind(APPROVAL_PENDING)
            .fetch_one(&mut *tx)
            .await?;

        let requirements = Self::requirements_for(&mut *tx, &[milestone_id]).await?;
        tx.commit().await?;

        if current_approval == APPROVAL_REJECTED && approval == APPROVAL_PENDING {
            tracing::debug!(milestone_id, "Rejected milestone returned to review queue");
        }

        Ok(RequirementToggle::Updated(MilestoneWithRequirements {
            milestone,
            requirements,
        }))
    }

    /// Record an admin approve/reject decision.
    ///
    /// An approved milestone is final, and approval needs the milestone to
    /// be completed. Both hold at write time: `None` means the row no longer
    /// qualifies (or does not exist).
    pub async fn record_review(
        pool: &PgPool,
        milestone_id: DbId,
        decision: &str,
        reason: Option<&str>,
        reviewer_id: DbId,
    ) -> Result<Option<CampaignMilestone>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_milestones SET
                admin_approval_status = $2,
                rejection_reason = $3,
                reviewed_by = $4,
                reviewed_at = NOW()
             WHERE id = $1
               AND admin_approval_status <> $5
               AND ($2 <> $5 OR status = $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignMilestone>(&query)
            .bind(milestone_id)
            .bind(decision)
            .bind(reason)
            .bind(reviewer_id)
            .bind(APPROVAL_APPROVED)
            .bind(PROGRESS_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    // ---- private helpers ----

    async fn list_for_campaign_inner(
        conn: &mut PgConnection,
        campaign_id: DbId,
    ) -> Result<Vec<MilestoneWithRequirements>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_milestones
             WHERE campaign_id = $1
             ORDER BY sort_order, id"
        );
        let milestones = sqlx::query_as::<_, CampaignMilestone>(&query)
            .bind(campaign_id)
            .fetch_all(&mut *conn)
            .await?;

        let ids: Vec<DbId> = milestones.iter().map(|m| m.id).collect();
        let mut by_milestone: HashMap<DbId, Vec<MilestoneRequirement>> = HashMap::new();
        for requirement in Self::requirements_for(conn, &ids).await? {
            by_milestone
                .entry(requirement.milestone_id)
                .or_default()
                .push(requirement);
        }

        Ok(milestones
            .into_iter()
            .map(|milestone| MilestoneWithRequirements {
                requirements: by_milestone.remove(&milestone.id).unwrap_or_default(),
                milestone,
            })
            .collect())
    }

    async fn requirements_for(
        conn: &mut PgConnection,
        milestone_ids: &[DbId],
    ) -> Result<Vec<MilestoneRequirement>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM milestone_requirements
             WHERE milestone_id = ANY($1)
             ORDER BY milestone_id, sort_order, id"
        );
        sqlx::query_as::<_, MilestoneRequirement>(&query)
            .bind(milestone_ids)
            .fetch_all(&mut *conn)
            .await
    }
}
