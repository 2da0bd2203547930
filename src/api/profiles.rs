use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::auth::CurrentUser;
use crate::api::types::{AnimeDto, UserProfileDto};
use crate::db::ProfileChanges;
use crate::models::watchlist::WatchCategory;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    pub avatar: Option<String>,
}

/// GET /profiles/{id}
/// Public profile page with the five shelves.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserProfileDto>>, ApiError> {
    let profile = state.shared.profile_service.view(id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /profiles/{id}/list/{category}
/// One shelf of a profile, most recently added first.
pub async fn get_shelf(
    State(state): State<Arc<AppState>>,
    Path((id, category)): Path<(i32, String)>,
) -> Result<Json<ApiResponse<Vec<AnimeDto>>>, ApiError> {
    let category: WatchCategory = category.parse().map_err(ApiError::ValidationError)?;

    let profile = state
        .shared
        .store
        .get_profile(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {id}")))?;

    let rows = state
        .shared
        .store
        .list_watch_category(profile.id, category)
        .await?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(AnimeDto::from).collect(),
    )))
}

/// GET /profiles/{id}/favorites
pub async fn get_favorites(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<AnimeDto>>>, ApiError> {
    let profile = state
        .shared
        .store
        .get_profile(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {id}")))?;

    let rows = state.shared.store.list_favorites(profile.id).await?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(AnimeDto::from).collect(),
    )))
}

/// PUT /profiles/{id}
/// Partial update; only the owner may edit.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserProfileDto>>, ApiError> {
    let changes = ProfileChanges {
        bio: payload.bio,
        birth_date: payload.birth_date,
        sex: payload.sex,
        avatar: payload.avatar,
    };

    let profile = state
        .shared
        .profile_service
        .update(user.0, id, changes)
        .await?;

    Ok(Json(ApiResponse::success(profile)))
}
