use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::anime::PageQuery;
use crate::api::types::{AnimeDto, CatalogFacetsDto, HomeDto, NamedDto, PageDto};
use crate::db::CatalogFilter;

/// A genre/director/studio page: the entity plus its titles.
#[derive(Serialize)]
pub struct FacetPageDto {
    pub info: NamedDto,
    pub anime: PageDto<AnimeDto>,
}

/// GET /home
/// The four home page sections in one response.
pub async fn home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HomeDto>>, ApiError> {
    let sections = state.shared.catalog_service.home().await?;
    Ok(Json(ApiResponse::success(sections)))
}

/// GET /filters
/// Every facet value the browse endpoint accepts.
pub async fn filters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CatalogFacetsDto>>, ApiError> {
    let facets = state.shared.catalog_service.facets().await?;
    Ok(Json(ApiResponse::success(facets)))
}

/// GET /genres/{slug}
pub async fn genre_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<FacetPageDto>>, ApiError> {
    let genre = state
        .shared
        .store
        .get_genre_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Genre {slug}")))?;

    let filter = CatalogFilter {
        genres: vec![genre.slug.clone()],
        ..CatalogFilter::default()
    };
    let anime = state
        .shared
        .catalog_service
        .browse(filter, query.page.max(1))
        .await?;

    Ok(Json(ApiResponse::success(FacetPageDto {
        info: NamedDto::from(genre),
        anime,
    })))
}

/// GET /directors/{slug}
pub async fn director_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<FacetPageDto>>, ApiError> {
    let director = state
        .shared
        .store
        .get_director_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Director {slug}")))?;

    let filter = CatalogFilter {
        directors: vec![director.slug.clone()],
        ..CatalogFilter::default()
    };
    let anime = state
        .shared
        .catalog_service
        .browse(filter, query.page.max(1))
        .await?;

    Ok(Json(ApiResponse::success(FacetPageDto {
        info: NamedDto::from(director),
        anime,
    })))
}

/// GET /studios/{slug}
pub async fn studio_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<FacetPageDto>>, ApiError> {
    let studio = state
        .shared
        .store
        .get_studio_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Studio {slug}")))?;

    let filter = CatalogFilter {
        studios: vec![studio.slug.clone()],
        ..CatalogFilter::default()
    };
    let anime = state
        .shared
        .catalog_service
        .browse(filter, query.page.max(1))
        .await?;

    Ok(Json(ApiResponse::success(FacetPageDto {
        info: NamedDto::from(studio),
        anime,
    })))
}

/// GET /genres
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NamedDto>>>, ApiError> {
    let rows = state.shared.store.list_genres().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(NamedDto::from).collect(),
    )))
}

/// GET /directors
pub async fn list_directors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NamedDto>>>, ApiError> {
    let rows = state.shared.store.list_directors().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(NamedDto::from).collect(),
    )))
}

/// GET /studios
pub async fn list_studios(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NamedDto>>>, ApiError> {
    let rows = state.shared.store.list_studios().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(NamedDto::from).collect(),
    )))
}
