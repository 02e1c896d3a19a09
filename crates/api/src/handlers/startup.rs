//! Handlers for the founder `/startup` surface: the startup itself, the
//! four-step campaign wizard, and milestone progress.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use raisehub_core::campaign::{
    advance_step, can_close, check_ready_for_review, ensure_editable, validate_basics,
    validate_story, BasicsInput, StoryInput, STEP_BASICS, STEP_STORY,
};
use raisehub_core::error::CoreError;
use raisehub_core::milestone::{
    dedup_ids, merge_milestones, order_templates, CustomMilestone, MilestoneTemplate,
};
use raisehub_core::profile::validate_url;
use raisehub_core::search::{
    clamp_limit, clamp_offset, ilike_pattern, normalize_filter, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use raisehub_core::startup::{
    validate_founded_year, validate_name, validate_stage, validate_team_size,
};
use raisehub_core::types::DbId;
use raisehub_db::models::campaign::{
    Campaign, CampaignBasics, CampaignStory, CreateCampaign,
};
use raisehub_db::models::milestone::RequirementToggle;
use raisehub_db::models::startup::{CreateStartup, Startup, StartupFilter, UpdateStartup};
use raisehub_db::repositories::{
    CampaignRepo, MilestoneRepo, PredefinedMilestoneRepo, StartupRepo,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::campaign::load_detail;
use crate::middleware::rbac::RequireFounder;
use crate::query::BrowseParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for step 3.
#[derive(Debug, Deserialize)]
pub struct SubmitMilestonesRequest {
    #[serde(default)]
    pub predefined_milestone_ids: Vec<DbId>,
    #[serde(default)]
    pub custom_milestones: Vec<CustomMilestone>,
}

/// Request body for toggling one milestone requirement.
#[derive(Debug, Deserialize)]
pub struct RequirementUpdate {
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's startup; founders must create one before any campaign work.
async fn ensure_founder_startup(pool: &PgPool, founder_id: DbId) -> AppResult<Startup> {
    StartupRepo::find_by_founder(pool, founder_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Create your startup profile first".into()))
}

/// A campaign owned by the caller. Other founders' campaigns are reported
/// as missing.
async fn ensure_own_campaign(pool: &PgPool, id: DbId, founder_id: DbId) -> AppResult<Campaign> {
    CampaignRepo::find_for_founder(pool, id, founder_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))
}

/// A guarded write found the campaign in a different status than the
/// handler checked, because a concurrent request moved it.
fn status_changed() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Campaign status changed during the request; reload and retry".into(),
    ))
}

fn basics_input(basics: &CampaignBasics) -> BasicsInput<'_> {
    BasicsInput {
        title: &basics.title,
        funding_target: basics.funding_target,
        min_investment: basics.min_investment,
        equity_offered: basics.equity_offered,
        deadline: basics.deadline,
    }
}

fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.trim().is_empty() {
        return Err(CoreError::Validation("Category must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// POST /api/startup/create-startup
pub async fn create_startup(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Json(input): Json<CreateStartup>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    validate_name(&input.name)?;
    validate_stage(&input.stage)?;
    validate_founded_year(input.founded_year, now)?;
    validate_team_size(input.team_size)?;
    validate_url("website_url", input.website_url.as_deref())?;
    if input.industry.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Industry must not be empty".into(),
        )));
    }

    let startup = StartupRepo::create(&state.pool, founder.user_id, &input).await?;
    tracing::info!(user_id = founder.user_id, startup_id = startup.id, "Startup created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: startup })))
}

/// GET /api/startup/my-startup
///
/// `data` is `null` until the founder creates a startup.
pub async fn my_startup(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let startup = StartupRepo::find_by_founder(&state.pool, founder.user_id).await?;
    Ok(Json(DataResponse { data: startup }))
}

/// PUT /api/startup/update-startup
pub async fn update_startup(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Json(input): Json<UpdateStartup>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_name(name)?;
    }
    if let Some(stage) = input.stage.as_deref() {
        validate_stage(stage)?;
    }
    validate_founded_year(input.founded_year, Utc::now())?;
    validate_team_size(input.team_size)?;
    validate_url("website_url", input.website_url.as_deref())?;

    let startup = StartupRepo::update_by_founder(&state.pool, founder.user_id, &input)
        .await?
        .ok_or_else(|| AppError::BadRequest("Create your startup profile first".into()))?;
    Ok(Json(DataResponse { data: startup }))
}

/// GET /api/startup/browse
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<impl IntoResponse> {
    let filter = StartupFilter {
        industry: normalize_filter(params.industry.as_deref()),
        stage: normalize_filter(params.stage.as_deref()),
        search: ilike_pattern(params.search.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let startups = StartupRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: startups }))
}

/// GET /api/startup/{id}
pub async fn get_startup(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let startup = StartupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Startup",
            id,
        }))?;
    Ok(Json(DataResponse { data: startup }))
}

/// GET /api/startup/predefined-milestones
pub async fn predefined_milestones(
    RequireFounder(_founder): RequireFounder,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = PredefinedMilestoneRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: templates }))
}

// ---------------------------------------------------------------------------
// Campaign wizard
// ---------------------------------------------------------------------------

/// POST /api/startup/submit-basic-campaign-details
///
/// Step 1: creates a draft. A startup has at most one open campaign.
pub async fn submit_basics(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Json(input): Json<CampaignBasics>,
) -> AppResult<impl IntoResponse> {
    validate_basics(&basics_input(&input), Utc::now())?;
    validate_category(&input.category)?;

    let startup = ensure_founder_startup(&state.pool, founder.user_id).await?;
    if let Some(open) = CampaignRepo::find_open_for_startup(&state.pool, startup.id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Startup already has an open campaign (id {}, status '{}')",
            open.id, open.status
        ))));
    }

    let campaign = CampaignRepo::create(
        &state.pool,
        &CreateCampaign {
            startup_id: startup.id,
            founder_id: founder.user_id,
            basics: input,
        },
    )
    .await?;

    tracing::info!(
        user_id = founder.user_id,
        campaign_id = campaign.id,
        "Campaign draft created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// PUT /api/startup/update-basic-campaign-details/{campaign_id}
///
/// Editing the target re-applies the allocation to existing milestones.
pub async fn update_basics(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CampaignBasics>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    ensure_editable(&existing.status)?;
    validate_basics(&basics_input(&input), Utc::now())?;
    validate_category(&input.category)?;

    let mut tx = state.pool.begin().await?;
    let mut campaign = CampaignRepo::update_basics(&mut *tx, campaign_id, &input)
        .await?
        .ok_or_else(status_changed)?;

    MilestoneRepo::reallocate(&mut *tx, campaign_id, campaign.funding_target).await?;
    let next = advance_step(campaign.current_step, STEP_BASICS);
    if next != campaign.current_step {
        CampaignRepo::set_step(&mut *tx, campaign_id, next).await?;
        campaign.current_step = next;
    }
    tx.commit().await?;

    let data = load_detail(&state.pool, campaign).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/startup/submit-campaign-story/{campaign_id}
///
/// Step 2.
pub async fn submit_story(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CampaignStory>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    ensure_editable(&campaign.status)?;
    validate_story(&StoryInput {
        pitch: &input.pitch,
        problem: input.problem.as_deref(),
        solution: input.solution.as_deref(),
        market: input.market.as_deref(),
        use_of_funds: input.use_of_funds.as_deref(),
    })?;
    validate_url("pitch_video_url", input.pitch_video_url.as_deref())?;

    let step = advance_step(campaign.current_step, STEP_STORY);
    let campaign = CampaignRepo::save_story(&state.pool, campaign_id, &input, step)
        .await?
        .ok_or_else(status_changed)?;

    Ok(Json(DataResponse { data: campaign }))
}

/// POST /api/startup/submit-milestones/{campaign_id}
///
/// Step 3: replaces the milestone set and recomputes the allocation.
pub async fn submit_milestones(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<SubmitMilestonesRequest>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    ensure_editable(&campaign.status)?;

    let ids = dedup_ids(&input.predefined_milestone_ids);
    let found: Vec<MilestoneTemplate> = PredefinedMilestoneRepo::find_active_by_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let templates = order_templates(&ids, found)?;
    let drafts = merge_milestones(&templates, &input.custom_milestones, campaign.funding_target)?;

    let milestones = MilestoneRepo::replace_for_campaign(&state.pool, campaign_id, &drafts)
        .await?
        .ok_or_else(status_changed)?;

    tracing::info!(
        user_id = founder.user_id,
        campaign_id,
        count = milestones.len(),
        "Campaign milestones submitted"
    );

    Ok(Json(DataResponse { data: milestones }))
}

/// POST /api/startup/submit-campaign-for-review/{campaign_id}
///
/// Step 4. Basics are re-checked since the deadline may have passed while
/// the campaign sat in draft.
pub async fn submit_for_review(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    ensure_editable(&campaign.status)?;

    let milestone_count = MilestoneRepo::count_for_campaign(&state.pool, campaign_id).await?;
    check_ready_for_review(campaign.has_story(), milestone_count)?;
    validate_basics(
        &BasicsInput {
            title: &campaign.title,
            funding_target: campaign.funding_target,
            min_investment: campaign.min_investment,
            equity_offered: campaign.equity_offered,
            deadline: campaign.deadline,
        },
        Utc::now(),
    )?;

    let campaign = CampaignRepo::submit_for_review(&state.pool, campaign_id)
        .await?
        .ok_or_else(status_changed)?;

    tracing::info!(
        user_id = founder.user_id,
        campaign_id,
        "Campaign submitted for review"
    );

    Ok(Json(DataResponse { data: campaign }))
}

/// GET /api/startup/my-campaigns
pub async fn my_campaigns(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list_by_founder(&state.pool, founder.user_id).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/startup/campaign/{campaign_id}
///
/// The founder's view of one campaign in any status.
pub async fn get_own_campaign(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    let data = load_detail(&state.pool, campaign).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Milestone progress and closing
// ---------------------------------------------------------------------------

/// PATCH /api/startup/milestones/{campaign_id}/{milestone_id}/requirements/{requirement_id}
pub async fn update_requirement(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path((campaign_id, milestone_id, requirement_id)): Path<(DbId, DbId, DbId)>,
    Json(input): Json<RequirementUpdate>,
) -> AppResult<impl IntoResponse> {
    ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    MilestoneRepo::find_in_campaign(&state.pool, campaign_id, milestone_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;

    // Toggle rules are checked under the milestone row lock.
    let updated = match MilestoneRepo::set_requirement_completion(
        &state.pool,
        milestone_id,
        requirement_id,
        input.completed,
    )
    .await?
    {
        RequirementToggle::Updated(updated) => updated,
        RequirementToggle::Refused(refusal) => return Err(AppError::Core(refusal)),
        RequirementToggle::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "MilestoneRequirement",
                id: requirement_id,
            }))
        }
    };

    tracing::info!(
        user_id = founder.user_id,
        campaign_id,
        milestone_id,
        requirement_id,
        completed = input.completed,
        status = %updated.milestone.status,
        "Milestone requirement updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/startup/close-campaign/{campaign_id}
pub async fn close_campaign(
    RequireFounder(founder): RequireFounder,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_own_campaign(&state.pool, campaign_id, founder.user_id).await?;
    if !can_close(&campaign.status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Only live or funded campaigns can be closed (current status '{}')",
            campaign.status
        ))));
    }

    let campaign = CampaignRepo::close(&state.pool, campaign_id)
        .await?
        .ok_or_else(status_changed)?;

    tracing::info!(user_id = founder.user_id, campaign_id, "Campaign closed");
    Ok(Json(DataResponse { data: campaign }))
}
