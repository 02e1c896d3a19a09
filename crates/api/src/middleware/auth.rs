//! Header-based caller identification.
//!
//! Clients send the id returned by login in a `user_id` header. The id is
//! looked up on every request so deactivated accounts lose access at once.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use raisehub_core::error::CoreError;
use raisehub_core::types::DbId;
use raisehub_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the request header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "user_id";

/// Authenticated, active user.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role name (`admin`, `founder`, `investor`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing user_id header".into()))
            })?;

        let user_id: DbId = raw.trim().parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid user_id header".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

        if !user.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}

/// `Option<AuthUser>`: anonymous when the header is absent, rejected when it
/// is present but invalid.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(USER_ID_HEADER) {
            return Ok(None);
        }
        <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
