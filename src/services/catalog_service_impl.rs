//! `SeaORM` implementation of the `CatalogService` trait.

use crate::api::types::{AnimeDetailDto, AnimeDto, CatalogFacetsDto, HomeDto, NamedDto, PageDto};
use crate::config::Config;
use crate::db::{CatalogFilter, Store};
use crate::models::anime::{AgeRating, AnimeKind, AnimeStatus, Season};
use crate::services::catalog_service::{CatalogError, CatalogService};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub struct SeaOrmCatalogService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn page_size(&self) -> u64 {
        self.config.read().await.catalog.page_size
    }

    async fn to_dtos(
        &self,
        rows: Vec<crate::entities::anime::Model>,
    ) -> Result<Vec<AnimeDto>, CatalogError> {
        let mut dtos = Vec::with_capacity(rows.len());
        for row in rows {
            dtos.push(AnimeDto::from(row));
        }
        Ok(dtos)
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn browse(
        &self,
        filter: CatalogFilter,
        page: u64,
    ) -> Result<PageDto<AnimeDto>, CatalogError> {
        let per_page = self.page_size().await;
        // Pages are 1-based at the API surface, 0-based in the repositories.
        let (rows, total_pages) = self
            .store
            .browse_anime(&filter, page.saturating_sub(1), per_page)
            .await?;

        Ok(PageDto {
            items: self.to_dtos(rows).await?,
            page,
            total_pages,
        })
    }

    async fn detail(
        &self,
        slug: &str,
        viewer_ip: Option<&str>,
        profile_id: Option<i32>,
    ) -> Result<AnimeDetailDto, CatalogError> {
        let anime = self
            .store
            .get_anime_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))?;

        // The view is registered first so the returned count includes it.
        if let Some(ip) = viewer_ip {
            self.store.record_view(anime.id, ip).await?;
            debug!(anime = %anime.slug, ip = %ip, "Registered catalog view");
        }

        let genres = self.store.anime_genres(&anime).await?;
        let directors = self.store.anime_directors(&anime).await?;
        let studio = self.store.anime_studio(&anime).await?;

        let views = self.store.view_count(anime.id).await?;
        let comment_count = self.store.comment_count(anime.id).await?;
        let average_rating = self.store.average_rating(anime.id).await?;

        let similar_limit = self.config.read().await.catalog.similar_limit;
        let similar = self.store.similar_anime(anime.id, similar_limit).await?;

        let (my_category, is_favorite, my_rating) = match profile_id {
            Some(pid) => (
                self.store.current_watch_category(pid, anime.id).await?,
                self.store.is_favorite(pid, anime.id).await?,
                self.store.get_rating(pid, anime.id).await?.map(|r| r.star),
            ),
            None => (None, false, None),
        };

        Ok(AnimeDetailDto {
            anime: AnimeDto::from(anime),
            genres: genres.into_iter().map(NamedDto::from).collect(),
            directors: directors.into_iter().map(NamedDto::from).collect(),
            studio: NamedDto::from(studio),
            views,
            comment_count,
            average_rating,
            similar: self.to_dtos(similar).await?,
            my_category: my_category.map(|c| c.as_str().to_string()),
            is_favorite,
            my_rating,
        })
    }

    async fn home(&self) -> Result<HomeDto, CatalogError> {
        let n = self.config.read().await.catalog.home_section_size;

        let trending = self.store.trending_anime(0, n).await?;
        let popular = self.store.popular_anime(0, n).await?;
        let recent = self.store.recent_anime(0, n).await?;
        let latest_commented = self
            .store
            .latest_commented_anime(usize::try_from(n).unwrap_or(6))
            .await?;

        Ok(HomeDto {
            trending: self.to_dtos(trending).await?,
            popular: self.to_dtos(popular).await?,
            recent: self.to_dtos(recent).await?,
            latest_commented: self.to_dtos(latest_commented).await?,
        })
    }

    async fn facets(&self) -> Result<CatalogFacetsDto, CatalogError> {
        let genres = self.store.list_genres().await?;
        let directors = self.store.list_directors().await?;
        let studios = self.store.list_studios().await?;
        let years = self.store.release_years().await?;

        Ok(CatalogFacetsDto {
            genres: genres.into_iter().map(NamedDto::from).collect(),
            directors: directors.into_iter().map(NamedDto::from).collect(),
            studios: studios.into_iter().map(NamedDto::from).collect(),
            years,
            statuses: AnimeStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            age_ratings: AgeRating::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            seasons: Season::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            kinds: AnimeKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
        })
    }

    async fn trending(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError> {
        let per_page = self.page_size().await;
        let rows = self
            .store
            .trending_anime(page.saturating_sub(1), per_page)
            .await?;
        self.to_dtos(rows).await
    }

    async fn popular(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError> {
        let per_page = self.page_size().await;
        let rows = self
            .store
            .popular_anime(page.saturating_sub(1), per_page)
            .await?;
        self.to_dtos(rows).await
    }

    async fn recent(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError> {
        let per_page = self.page_size().await;
        let rows = self
            .store
            .recent_anime(page.saturating_sub(1), per_page)
            .await?;
        self.to_dtos(rows).await
    }

    async fn random(&self) -> Result<Option<AnimeDto>, CatalogError> {
        let pick = self.store.recommend_random_anime().await?;
        Ok(pick.map(AnimeDto::from))
    }
}
