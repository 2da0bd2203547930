use axum::{
    Json,
    extract::{ConnectInfo, Path, Query, Request, State},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::{AnimeDetailDto, AnimeDto, PageDto};
use crate::db::CatalogFilter;

#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub q: Option<String>,
    /// Comma-separated slugs / values.
    pub genres: Option<String>,
    pub directors: Option<String>,
    pub studios: Option<String>,
    pub years: Option<String>,
    pub statuses: Option<String>,
    pub age_ratings: Option<String>,
    pub seasons: Option<String>,
    pub kinds: Option<String>,
}

const fn default_page() -> u64 {
    1
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map_or_else(Vec::new, |s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
}

impl BrowseQuery {
    fn into_filter(self) -> (CatalogFilter, u64) {
        let page = self.page.max(1);
        let filter = CatalogFilter {
            q: self.q.filter(|q| !q.trim().is_empty()),
            genres: split_csv(self.genres),
            directors: split_csv(self.directors),
            studios: split_csv(self.studios),
            years: split_csv(self.years),
            statuses: split_csv(self.statuses),
            age_ratings: split_csv(self.age_ratings),
            seasons: split_csv(self.seasons),
            kinds: split_csv(self.kinds),
        };
        (filter, page)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

/// GET /anime
/// Filtered, paginated catalog listing.
pub async fn list_anime(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ApiResponse<PageDto<AnimeDto>>>, ApiError> {
    let (filter, page) = query.into_filter();
    let result = state.shared.catalog_service.browse(filter, page).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /anime/trending
pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<AnimeDto>>>, ApiError> {
    let rows = state
        .shared
        .catalog_service
        .trending(query.page.max(1))
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// GET /anime/popular
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<AnimeDto>>>, ApiError> {
    let rows = state
        .shared
        .catalog_service
        .popular(query.page.max(1))
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// GET /anime/recent
pub async fn recent(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<AnimeDto>>>, ApiError> {
    let rows = state
        .shared
        .catalog_service
        .recent(query.page.max(1))
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// GET /anime/random
/// One uniformly random pick; `data` is null on an empty catalog.
pub async fn random(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Option<AnimeDto>>>, ApiError> {
    let pick = state.shared.catalog_service.random().await?;
    Ok(Json(ApiResponse::success(pick)))
}

/// GET /anime/{slug}
/// Detail page; every hit registers a deduplicated view for the caller's IP.
pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    session: Session,
    request: Request,
) -> Result<Json<ApiResponse<AnimeDetailDto>>, ApiError> {
    let ip = client_ip(&request);

    let profile_id = match session.get::<i32>("user_id").await.ok().flatten() {
        Some(user_id) => state
            .shared
            .store
            .find_profile_by_user(user_id)
            .await?
            .map(|p| p.id),
        None => None,
    };

    let detail = state
        .shared
        .catalog_service
        .detail(&slug, ip.as_deref(), profile_id)
        .await?;

    Ok(Json(ApiResponse::success(detail)))
}

/// Best-effort client address: forwarded headers first, then the socket peer.
fn client_ip(request: &Request) -> Option<String> {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
    {
        let value = value.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
}
