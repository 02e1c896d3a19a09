//! Public handlers for the `/blog` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use raisehub_core::search::{
    clamp_limit, clamp_offset, normalize_filter, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use raisehub_db::repositories::BlogPostRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BlogListParams {
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/blog?tag=
///
/// Published posts, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<impl IntoResponse> {
    let tag = normalize_filter(params.tag.as_deref());
    let posts = BlogPostRepo::list_published(
        &state.pool,
        tag.as_deref(),
        clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/blog/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog post '{slug}' not found")))?;
    Ok(Json(DataResponse { data: post }))
}
