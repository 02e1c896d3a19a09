//! Handlers for the `/admin` surface. Every route requires the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use raisehub_core::blog::{generate_slug, normalize_tags, validate_content, validate_title};
use raisehub_core::campaign::{review_transition, validate_status, STATUS_REJECTED};
use raisehub_core::error::CoreError;
use raisehub_core::milestone::{clean_requirements, validate_review, ReviewTarget};
use raisehub_core::profile::validate_url;
use raisehub_core::roles::{ROLE_ADMIN, ROLE_FOUNDER, ROLE_INVESTOR};
use raisehub_core::search::{
    clamp_limit, clamp_offset, ilike_pattern, normalize_filter, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use raisehub_core::types::DbId;
use raisehub_db::models::blog::{CreateBlogPost, UpdateBlogPost};
use raisehub_db::models::campaign::CampaignFilter;
use raisehub_db::models::milestone::{CreatePredefinedMilestone, UpdatePredefinedMilestone};
use raisehub_db::models::startup::StartupFilter;
use raisehub_db::models::user::UserResponse;
use raisehub_db::repositories::{
    BlogPostRepo, CampaignRepo, MilestoneRepo, PredefinedMilestoneRepo, StartupRepo, StatsRepo,
    UserRepo,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{BrowseParams, IncludeInactiveParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_FOUNDER, ROLE_INVESTOR];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifyStartupRequest {
    pub is_verified: bool,
}

/// Body of `POST /admin/review-campaign/{id}`: `approve` or `reject`.
#[derive(Debug, Deserialize)]
pub struct CampaignReviewRequest {
    pub decision: String,
    pub reason: Option<String>,
}

/// Body of `POST /admin/approve-reject-milestones/{campaign_id}/{milestone_id}`.
#[derive(Debug, Deserialize)]
pub struct MilestoneReviewRequest {
    pub status: String,
    pub rejection_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/admin/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/admin/users?role=
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<impl IntoResponse> {
    let role = normalize_filter(params.role.as_deref());
    if let Some(role) = role.as_deref() {
        if !VALID_ROLES.contains(&role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid role '{role}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))));
        }
    }

    let users = UserRepo::list(
        &state.pool,
        role.as_deref(),
        clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/admin/users/{id}/status
pub async fn set_user_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UserStatusRequest>,
) -> AppResult<impl IntoResponse> {
    if user_id == admin.user_id && !input.is_active {
        return Err(AppError::BadRequest(
            "Admins cannot deactivate their own account".into(),
        ));
    }

    let updated = UserRepo::set_active(&state.pool, user_id, input.is_active).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id,
        is_active = input.is_active,
        "User status changed"
    );

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

// ---------------------------------------------------------------------------
// Startups
// ---------------------------------------------------------------------------

/// GET /api/admin/startups
pub async fn list_startups(
    RequireAdmin(_admin): RequireAdmin,
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

/// PATCH /api/admin/startups/{id}/verify
pub async fn verify_startup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(startup_id): Path<DbId>,
    Json(input): Json<VerifyStartupRequest>,
) -> AppResult<impl IntoResponse> {
    let startup = StartupRepo::set_verified(&state.pool, startup_id, input.is_verified)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Startup",
            id: startup_id,
        }))?;

    tracing::info!(
        admin_id = admin.user_id,
        startup_id,
        is_verified = input.is_verified,
        "Startup verification changed"
    );

    Ok(Json(DataResponse { data: startup }))
}

// ---------------------------------------------------------------------------
// Campaign review
// ---------------------------------------------------------------------------

/// GET /api/admin/campaigns?status=
///
/// All campaigns regardless of status unless filtered.
pub async fn list_campaigns(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CampaignListParams>,
) -> AppResult<impl IntoResponse> {
    let statuses = match normalize_filter(params.status.as_deref()) {
        Some(status) => {
            validate_status(&status)?;
            vec![status]
        }
        None => Vec::new(),
    };
    let filter = CampaignFilter {
        statuses,
        category: None,
        search: ilike_pattern(params.search.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let campaigns = CampaignRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// POST /api/admin/review-campaign/{campaign_id}
pub async fn review_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CampaignReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let reason = input.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let new_status = review_transition(&campaign.status, &input.decision, reason)?;
    let reason = reason.filter(|_| new_status == STATUS_REJECTED);

    // Another admin may have decided first.
    let campaign = CampaignRepo::apply_review(&state.pool, campaign_id, new_status, reason)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Campaign is no longer under review".into(),
            ))
        })?;

    tracing::info!(
        admin_id = admin.user_id,
        campaign_id,
        status = new_status,
        "Campaign reviewed"
    );

    Ok(Json(DataResponse { data: campaign }))
}

/// POST /api/admin/approve-reject-milestones/{campaign_id}/{milestone_id}
///
/// Approving a milestone releases its allocation to the founder.
pub async fn review_milestone(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((campaign_id, milestone_id)): Path<(DbId, DbId)>,
    Json(input): Json<MilestoneReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    let milestone = MilestoneRepo::find_in_campaign(&state.pool, campaign_id, milestone_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;

    let decision = input.status.trim().to_lowercase();
    let reason = input
        .rejection_reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    validate_review(
        &decision,
        reason,
        &ReviewTarget {
            campaign_status: &campaign.status,
            progress_status: &milestone.status,
            approval_status: &milestone.admin_approval_status,
        },
    )?;

    let milestone =
        MilestoneRepo::record_review(&state.pool, milestone_id, &decision, reason, admin.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "Milestone changed during review (already approved or no longer completed)"
                        .into(),
                ))
            })?;

    tracing::info!(
        admin_id = admin.user_id,
        campaign_id,
        milestone_id,
        decision = %decision,
        "Milestone reviewed"
    );

    Ok(Json(DataResponse { data: milestone }))
}

// ---------------------------------------------------------------------------
// Predefined milestones
// ---------------------------------------------------------------------------

/// GET /api/admin/predefined-milestones?include_inactive=
pub async fn list_predefined_milestones(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let templates = PredefinedMilestoneRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: templates }))
}

fn validate_template_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Milestone title must not be empty".into(),
        ));
    }
    if title.chars().count() > raisehub_core::milestone::MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Milestone title must be at most {} characters",
            raisehub_core::milestone::MAX_TITLE_LEN
        )));
    }
    Ok(())
}

/// POST /api/admin/predefined-milestones
pub async fn create_predefined_milestone(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreatePredefinedMilestone>,
) -> AppResult<impl IntoResponse> {
    validate_template_title(&input.title)?;
    input.title = input.title.trim().to_string();
    input.requirements = clean_requirements(&input.title, &input.requirements)?;

    let template = PredefinedMilestoneRepo::create(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        template_id = template.id,
        "Predefined milestone created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// PUT /api/admin/predefined-milestones/{id}
pub async fn update_predefined_milestone(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePredefinedMilestone>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_deref() {
        validate_template_title(title)?;
        input.title = Some(title.trim().to_string());
    }
    if let Some(requirements) = input.requirements.take() {
        let label = input.title.as_deref().unwrap_or("template");
        input.requirements = Some(clean_requirements(label, &requirements)?);
    }

    let template = PredefinedMilestoneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PredefinedMilestone",
            id,
        }))?;
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/admin/predefined-milestones/{id}
///
/// Deactivates the template. Campaign milestones copied from it are kept.
pub async fn delete_predefined_milestone(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = PredefinedMilestoneRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PredefinedMilestone",
            id,
        }));
    }
    tracing::info!(admin_id = admin.user_id, template_id = id, "Predefined milestone deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

/// GET /api/admin/blogs
///
/// Drafts included.
pub async fn list_blogs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list_all(
        &state.pool,
        clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/admin/blogs
pub async fn create_blog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;
    validate_url("cover_image_url", input.cover_image_url.as_deref())?;
    let tags = normalize_tags(&input.tags)?;
    let slug = generate_slug(&input.title);

    let post = BlogPostRepo::create(&state.pool, admin.user_id, &slug, &tags, &input).await?;
    tracing::info!(admin_id = admin.user_id, post_id = post.id, slug = %post.slug, "Blog post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/admin/blogs/{id}
///
/// A new title regenerates the slug.
pub async fn update_blog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    let slug = match input.title.as_deref() {
        Some(title) => {
            validate_title(title)?;
            Some(generate_slug(title))
        }
        None => None,
    };
    if let Some(content) = input.content.as_deref() {
        validate_content(content)?;
    }
    validate_url("cover_image_url", input.cover_image_url.as_deref())?;
    let tags = input.tags.as_deref().map(normalize_tags).transpose()?;

    let post = BlogPostRepo::update(&state.pool, id, slug.as_deref(), tags.as_deref(), &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/admin/blogs/{id}
pub async fn delete_blog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BlogPostRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }));
    }
    tracing::info!(admin_id = admin.user_id, post_id = id, "Blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}
