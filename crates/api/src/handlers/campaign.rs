//! Handlers for the public and investor `/campaign` surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use raisehub_core::campaign::{is_public, STATUS_FUNDED, STATUS_LIVE};
use raisehub_core::error::CoreError;
use raisehub_core::funding::{
    status_after_investment, summarize, validate_investment, FundingSummary, InvestmentTarget,
    MilestoneFunding,
};
use raisehub_core::search::{
    clamp_limit, clamp_offset, ilike_pattern, normalize_filter, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use raisehub_core::types::{Amount, DbId};
use raisehub_db::models::campaign::{Campaign, CampaignFilter};
use raisehub_db::models::investment::Investment;
use raisehub_db::models::milestone::MilestoneWithRequirements;
use raisehub_db::repositories::{CampaignRepo, InvestmentRepo, MilestoneRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireInvestor;
use crate::query::BrowseParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A campaign with its milestones and funding overview.
#[derive(Debug, Serialize)]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub milestones: Vec<MilestoneWithRequirements>,
    pub funding: FundingSummary,
}

/// Request body for `POST /campaign/{id}/invest`.
#[derive(Debug, Deserialize)]
pub struct InvestRequest {
    pub amount: Amount,
}

/// Result of an investment: the new row and the campaign totals after it.
#[derive(Debug, Serialize)]
pub struct InvestmentReceipt {
    pub investment: Investment,
    pub campaign: Campaign,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Funding summary of a campaign given its milestones.
pub fn funding_summary(
    campaign: &Campaign,
    milestones: &[MilestoneWithRequirements],
) -> FundingSummary {
    let funding: Vec<MilestoneFunding<'_>> = milestones
        .iter()
        .map(|m| MilestoneFunding {
            fund_percentage: m.milestone.fund_percentage,
            progress_status: &m.milestone.status,
            approval_status: &m.milestone.admin_approval_status,
        })
        .collect();
    summarize(campaign.funding_target, campaign.raised_amount, &funding)
}

/// Load milestones and build the detail view of a campaign.
pub async fn load_detail(pool: &PgPool, campaign: Campaign) -> AppResult<CampaignDetail> {
    let milestones = MilestoneRepo::list_for_campaign(pool, campaign.id).await?;
    let funding = funding_summary(&campaign, &milestones);
    Ok(CampaignDetail {
        campaign,
        milestones,
        funding,
    })
}

/// Fetch a campaign visible to the public. Drafts and campaigns under
/// review are reported as missing.
async fn ensure_public_campaign(pool: &PgPool, id: DbId) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(pool, id)
        .await?
        .filter(|c| is_public(&c.status))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/campaign/list
///
/// Live and funded campaigns, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<impl IntoResponse> {
    let filter = CampaignFilter {
        statuses: vec![STATUS_LIVE.to_string(), STATUS_FUNDED.to_string()],
        category: normalize_filter(params.category.as_deref()),
        search: ilike_pattern(params.search.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let campaigns = CampaignRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/campaign/{id}
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_public_campaign(&state.pool, id).await?;
    let data = load_detail(&state.pool, campaign).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/campaign/{id}/funding-summary
pub async fn get_funding_summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_public_campaign(&state.pool, id).await?;
    let milestones = MilestoneRepo::list_for_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: funding_summary(&campaign, &milestones),
    }))
}

/// POST /api/campaign/{id}/invest
///
/// Runs in one transaction holding a row lock on the campaign, so
/// concurrent investments cannot overshoot the funding target.
pub async fn invest(
    RequireInvestor(investor): RequireInvestor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InvestRequest>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let campaign = CampaignRepo::lock_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;

    validate_investment(
        &InvestmentTarget {
            status: &campaign.status,
            deadline: campaign.deadline,
            min_investment: campaign.min_investment,
            funding_target: campaign.funding_target,
            raised_amount: campaign.raised_amount,
        },
        input.amount,
        Utc::now(),
    )?;

    let investment = InvestmentRepo::insert(&mut *tx, id, investor.user_id, input.amount).await?;
    let new_status =
        status_after_investment(campaign.funding_target, campaign.raised_amount + input.amount);
    let campaign = CampaignRepo::record_investment(&mut *tx, id, input.amount, new_status).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = investor.user_id,
        campaign_id = id,
        investment_id = investment.id,
        amount = input.amount,
        raised = campaign.raised_amount,
        status = %campaign.status,
        "Investment recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: InvestmentReceipt {
                investment,
                campaign,
            },
        }),
    ))
}

/// GET /api/campaign/my-investments
pub async fn my_investments(
    RequireInvestor(investor): RequireInvestor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let portfolio = InvestmentRepo::list_portfolio(&state.pool, investor.user_id).await?;
    Ok(Json(DataResponse { data: portfolio }))
}
