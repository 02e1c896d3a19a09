//! Handlers for the `/profile` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use raisehub_core::error::CoreError;
use raisehub_core::profile::{
    validate_bio, validate_ticket_range, validate_url, validate_wallet_address,
};
use raisehub_core::roles::ROLE_ADMIN;
use raisehub_core::types::{DbId, Timestamp};
use raisehub_db::models::profile::{Profile, UpdateProfile};
use raisehub_db::models::user::UserResponse;
use raisehub_db::repositories::{ProfileRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The caller's own account and profile.
#[derive(Debug, Serialize)]
pub struct OwnProfile {
    pub user: UserResponse,
    pub profile: Profile,
}

/// Another user's profile as seen by the caller. Email is admin-only.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub id: DbId,
    pub full_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub member_since: Timestamp,
    pub profile: Profile,
}

/// Request body for `PUT /profile`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub profile: UpdateProfile,
}

async fn load_own(state: &AppState, user_id: DbId) -> AppResult<OwnProfile> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id: user_id }))?;
    let profile = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Profile", id: user_id }))?;
    Ok(OwnProfile {
        user: user.into(),
        profile,
    })
}

/// GET /api/profile
pub async fn get_own(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = load_own(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/profile
///
/// Partial update of the caller's name and profile fields.
pub async fn update_own(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let p = &input.profile;
    validate_bio(p.bio.as_deref())?;
    validate_url("linkedin_url", p.linkedin_url.as_deref())?;
    validate_url("website_url", p.website_url.as_deref())?;
    validate_url("avatar_url", p.avatar_url.as_deref())?;
    if let Some(wallet) = p.wallet_address.as_deref() {
        validate_wallet_address(wallet)?;
    }

    // The ticket range is checked against the merged result of the update.
    let current = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;
    validate_ticket_range(
        p.min_ticket.or(current.min_ticket),
        p.max_ticket.or(current.max_ticket),
    )?;

    if let Some(name) = input.full_name.as_deref() {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Full name must not be empty".into(),
            )));
        }
        UserRepo::update_full_name(&state.pool, auth.user_id, name).await?;
    }

    ProfileRepo::update(&state.pool, auth.user_id, p).await?;
    tracing::debug!(user_id = auth.user_id, "Profile updated");

    let data = load_own(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/profile/{user_id}
///
/// Public profile of any user. Anonymous callers are allowed.
pub async fn get_public(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let OwnProfile { user, profile } = load_own(&state, user_id).await?;
    let is_admin = viewer.is_some_and(|v| v.role == ROLE_ADMIN);

    Ok(Json(DataResponse {
        data: PublicProfile {
            id: user.id,
            full_name: user.full_name,
            role: user.role,
            email: is_admin.then_some(user.email),
            member_since: user.created_at,
            profile,
        },
    }))
}
