use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::auth::CurrentUser;
use crate::models::watchlist::WatchCategory;

#[derive(Deserialize)]
pub struct SetCategoryRequest {
    /// watching | `will_watch` | viewed | dropped
    pub category: String,
}

#[derive(Serialize)]
pub struct CategoryStateResponse {
    /// The category the title is now in, or null when it was toggled off.
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct FavoriteStateResponse {
    pub is_favorite: bool,
}

/// POST /anime/{slug}/list
/// Toggle the title into (or out of) a watch category.
pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SetCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryStateResponse>>, ApiError> {
    let category: WatchCategory = payload
        .category
        .parse()
        .map_err(ApiError::ValidationError)?;

    let result = state
        .shared
        .watchlist_service
        .set_category(user.0, &slug, category)
        .await?;

    Ok(Json(ApiResponse::success(CategoryStateResponse {
        category: result.map(|c| c.as_str().to_string()),
    })))
}

/// POST /anime/{slug}/favorite
/// Flip the favorite flag.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<FavoriteStateResponse>>, ApiError> {
    let is_favorite = state
        .shared
        .watchlist_service
        .toggle_favorite(user.0, &slug)
        .await?;

    Ok(Json(ApiResponse::success(FavoriteStateResponse {
        is_favorite,
    })))
}
