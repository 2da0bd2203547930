use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::auth::CurrentUser;
use crate::api::types::CommentDto;

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
    pub parent_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct RateRequest {
    /// 1..=10
    pub star: i32,
}

/// GET /anime/{slug}/comments
/// All comments on a title, newest first. Public.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommentDto>>>, ApiError> {
    let comments = state.shared.community_service.list_comments(&slug).await?;
    Ok(Json(ApiResponse::success(comments)))
}

/// POST /anime/{slug}/comments
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<ApiResponse<CommentDto>>, ApiError> {
    let comment = state
        .shared
        .community_service
        .add_comment(user.0, &slug, payload.parent_id, &payload.text)
        .await?;

    Ok(Json(ApiResponse::success(comment)))
}

/// DELETE /comments/{id}
/// Author-only.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .shared
        .community_service
        .delete_comment(user.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /anime/{slug}/rating
/// Set or overwrite the caller's star rating.
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .shared
        .community_service
        .rate(user.0, &slug, payload.star)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
